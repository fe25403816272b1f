//! Function-pointer finite state machine engine for stick gestures.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌─────────┬───────────┬──────────┬───────────────────┐  │
//! │  │ StateId │ on_enter  │ on_exit  │ on_update         │  │
//! │  ├─────────┼───────────┼──────────┼───────────────────┤  │
//! │  │ Idle    │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ Jumping │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  │ Ducking │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  └─────────┴───────────┴──────────┴───────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the current state.  The
//! handler writes this tick's output into `ctx.command` and may return
//! `Some(next_id)`; the engine then runs `on_exit` for the current state
//! and `on_enter` for the next, which overwrites the output for the new
//! state.  Exactly one output is produced per tick either way.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;
use serde::Serialize;

/// Gesture states.  Must stay in sync with [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum StateId {
    Idle = 0,
    Jumping = 1,
    Ducking = 2,
}

impl StateId {
    /// Total number of states, sizes the table array.
    pub const COUNT: usize = 3;

    /// Convert a table index back to `StateId`.  Asserts in debug builds;
    /// falls back to `Idle` (no gesture) in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Jumping,
            2 => Self::Ducking,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Idle
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Jumping => "Jumping",
            Self::Ducking => "Ducking",
        }
    }
}

impl core::fmt::Display for StateId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// `on_enter` / `on_exit` action, run once per transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Per-tick handler.  `Some(next)` requests a transition.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

/// One row of the state table.  Fixed-size array, no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

/// The gesture state machine.
pub struct Fsm {
    table: [StateDescriptor; StateId::COUNT],
    current: usize,
    /// Wraps at `u64::MAX`; at 20 Hz that is never.
    tick_count: u64,
    state_entry_tick: u64,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter`.  Call once before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance one control tick.
    ///
    /// Returns the state transitioned into, if any.
    pub fn tick(&mut self, ctx: &mut FsmContext) -> Option<StateId> {
        self.tick_count = self.tick_count.wrapping_add(1);
        ctx.ticks_in_state = self.tick_count.wrapping_sub(self.state_entry_tick);

        let next = (self.table[self.current].on_update)(ctx)?;
        if next as usize == self.current {
            return None;
        }
        self.transition(next, ctx);
        Some(next)
    }

    /// Jump straight to `next`, running exit/enter actions.  No-op if
    /// already there.
    pub fn force_transition(&mut self, next: StateId, ctx: &mut FsmContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count.wrapping_sub(self.state_entry_tick)
    }

    fn transition(&mut self, next_id: StateId, ctx: &mut FsmContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.state_entry_tick = self.tick_count;
        ctx.ticks_in_state = 0;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
