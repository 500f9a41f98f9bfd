//! Combat units: a player profile placed on the grid with live resources

use serde::{Deserialize, Serialize};

use crate::grid::coord::TileCoord;
use crate::player::profile::Player;

/// Which side a unit fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitTeam {
    Player,
    Enemy,
}

/// A player instance in an active battle
///
/// The wrapped `Player` is immutable for the duration of combat; only the
/// live resources here change. Once `defeated` turns true it never reverts,
/// and the unit is excluded from turn order and targeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatUnit {
    pub player: Player,
    pub position: TileCoord,
    pub current_ap: u32,
    pub current_mp: u32,
    pub current_hp: u32,
    pub max_hp: u32,
    pub team: UnitTeam,
    pub defeated: bool,
}

impl CombatUnit {
    /// Place a player on the grid with full per-turn resources
    pub fn from_player(player: Player, position: TileCoord, team: UnitTeam, hp: u32) -> Self {
        Self {
            current_ap: player.base_ap,
            current_mp: player.base_mp,
            current_hp: hp,
            max_hp: hp,
            player,
            position,
            team,
            defeated: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.defeated
    }

    /// Reset AP/MP to the profile's base values (turn start)
    pub fn refresh_resources(&mut self) {
        self.current_ap = self.player.base_ap;
        self.current_mp = self.player.base_mp;
    }

    /// Apply damage, flooring HP at zero; defeat triggers exactly at zero
    pub fn apply_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
        if self.current_hp == 0 {
            self.defeated = true;
        }
    }
}
