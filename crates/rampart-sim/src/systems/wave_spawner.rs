//! Wave director: schedules staggered spawns and releases them when due.
//!
//! Starting a wave does not spawn anything directly. It appends one
//! `PendingSpawn` per enemy to the director's list; the spawn system draws
//! the entries whose time has come on each tick. Clearing the list cancels
//! everything still outstanding.

use hecs::World;

use rampart_core::config::WaveConfig;
use rampart_core::constants::*;
use rampart_core::enums::EnemyKind;
use rampart_core::events::GameEvent;
use rampart_core::path::PathModel;

use crate::world_setup::{self, EntityIds};

/// Slack when comparing accumulated frame time against fire times.
const TIME_EPSILON: f64 = 1e-9;

/// A spawn scheduled for a future tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSpawn {
    /// Simulation time (seconds) at which the enemy appears.
    pub fire_at: f64,
    /// Scheduling order, for stable ordering of simultaneous entries.
    pub seq: u64,
    pub wave: u32,
    /// Position of this spawn within its wave.
    pub index: u32,
    pub kind: EnemyKind,
}

/// Owns the list of outstanding spawns.
#[derive(Debug, Clone, Default)]
pub struct WaveDirector {
    pending: Vec<PendingSpawn>,
    next_seq: u64,
}

impl WaveDirector {
    /// Schedule every spawn of `wave`, starting at `now`. Returns the count.
    pub fn start_wave(&mut self, wave: u32, now: f64, config: &WaveConfig) -> u32 {
        let count = config.spawn_count(wave);
        self.pending.reserve(count as usize);
        for index in 0..count {
            self.pending.push(PendingSpawn {
                fire_at: now + index as f64 * config.stagger_secs,
                seq: self.next_seq,
                wave,
                index,
                kind: select_enemy_kind(wave, index),
            });
            self.next_seq += 1;
        }
        count
    }

    /// Remove and return every entry due at `now`, ordered by fire time then
    /// scheduling order.
    pub fn drain_due(&mut self, now: f64) -> Vec<PendingSpawn> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|spawn| spawn.fire_at <= now + TIME_EPSILON);
        self.pending = waiting;
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));
        due
    }

    pub fn pending(&self) -> &[PendingSpawn] {
        &self.pending
    }

    /// No spawns outstanding.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Cancel all outstanding spawns.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Enemy variant for spawn `index` of `wave`. First matching rule wins.
pub fn select_enemy_kind(wave: u32, index: u32) -> EnemyKind {
    if wave >= BOSS_MIN_WAVE && index % BOSS_MODULUS == BOSS_OFFSET {
        EnemyKind::Boss
    } else if wave > HEAVY_AFTER_WAVE && index % HEAVY_MODULUS == HEAVY_OFFSET {
        EnemyKind::Heavy
    } else if wave >= FAST_MIN_WAVE && index % FAST_MODULUS == FAST_OFFSET {
        EnemyKind::Fast
    } else {
        EnemyKind::Basic
    }
}

/// Spawn every due enemy. Returns how many were spawned.
pub fn run(
    world: &mut World,
    director: &mut WaveDirector,
    ids: &mut EntityIds,
    path: &PathModel,
    now: f64,
    events: &mut Vec<GameEvent>,
) -> usize {
    let due = director.drain_due(now);
    for spawn in &due {
        let (_, enemy_id) = world_setup::spawn_enemy(world, ids, path, spawn.kind, spawn.wave);
        tracing::debug!(
            enemy_id,
            kind = spawn.kind.tag(),
            wave = spawn.wave,
            index = spawn.index,
            "enemy spawned"
        );
        events.push(GameEvent::EnemySpawned {
            enemy_id,
            kind: spawn.kind,
        });
    }
    due.len()
}
