//! Concrete state handler functions and table builder.
//!
//! Each state is three plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!            [jump edge]                     [timeout]
//!  IDLE ─────────────────────▶ JUMPING ─────────────────▶ IDLE
//!    │                            ▲
//!    │ [duck edge]                │ [jump edge]
//!    ▼                            │
//!  DUCKING ───────────────────────┘
//!    │
//!    └──[min ticks elapsed && DOWN released]──▶ IDLE
//! ```
//!
//! A jump edge is a button press or UP newly appearing on the stick; a
//! duck edge is DOWN newly appearing.  An edge on the landing tick starts
//! a new jump one Idle tick later.  Gesture flags are merged into the
//! live stick direction, never replacing the horizontal component.

use super::context::FsmContext;
use super::{StateDescriptor, StateId};
use crate::command::Command;
use log::{debug, info};

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        StateDescriptor {
            id: StateId::Jumping,
            name: "Jumping",
            on_enter: Some(jumping_enter),
            on_exit: Some(jumping_exit),
            on_update: jumping_update,
        },
        StateDescriptor {
            id: StateId::Ducking,
            name: "Ducking",
            on_enter: Some(ducking_enter),
            on_exit: Some(ducking_exit),
            on_update: ducking_update,
        },
    ]
}

fn jump_output(direction: Command) -> Command {
    direction.difference(Command::DOWN) | Command::UP
}

fn duck_output(direction: Command) -> Command {
    direction.difference(Command::UP) | Command::DOWN
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE: stick passes straight through
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut FsmContext) {
    ctx.command = ctx.direction;
    // Landing tick: an edge seen here would be latched away before Idle
    // gets to update, so carry it over.
    ctx.jump_pending = ctx.jump_requested();
}

fn idle_update(ctx: &mut FsmContext) -> Option<StateId> {
    if core::mem::take(&mut ctx.jump_pending) || ctx.jump_requested() {
        return Some(StateId::Jumping);
    }
    if ctx.duck_requested() {
        return Some(StateId::Ducking);
    }
    ctx.command = ctx.direction;
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  JUMPING: UP forced for a fixed number of ticks
// ═══════════════════════════════════════════════════════════════════════════

fn jumping_enter(ctx: &mut FsmContext) {
    ctx.command = jump_output(ctx.direction);
    info!(
        "JUMPING: airborne for {} ticks ({:.2}s)",
        ctx.config.jump_timeout_ticks,
        f32::from(ctx.config.jump_timeout_ticks) * ctx.tick_period_secs
    );
}

fn jumping_exit(ctx: &mut FsmContext) {
    debug!("JUMPING: landed after {} ticks", ctx.ticks_in_state);
}

fn jumping_update(ctx: &mut FsmContext) -> Option<StateId> {
    // Edges are swallowed while airborne; only the clock ends a jump.
    if ctx.ticks_in_state >= u64::from(ctx.config.jump_timeout_ticks) {
        return Some(StateId::Idle);
    }
    ctx.command = jump_output(ctx.direction);
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  DUCKING: DOWN held for at least the minimum, longer while stick is down
// ═══════════════════════════════════════════════════════════════════════════

fn ducking_enter(ctx: &mut FsmContext) {
    ctx.command = duck_output(ctx.direction);
    info!(
        "DUCKING: minimum {} ticks",
        ctx.config.duck_timeout_ticks
    );
}

fn ducking_exit(ctx: &mut FsmContext) {
    debug!("DUCKING: stood up after {} ticks", ctx.ticks_in_state);
}

fn ducking_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.jump_requested() {
        return Some(StateId::Jumping);
    }

    let min_elapsed = ctx.ticks_in_state >= u64::from(ctx.config.duck_timeout_ticks);
    if min_elapsed && !ctx.direction.contains(Command::DOWN) {
        return Some(StateId::Idle);
    }

    ctx.command = duck_output(ctx.direction);
    None
}
