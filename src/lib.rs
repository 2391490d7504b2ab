/* lib.rs
 *
 * Copyright 2026 emviolet
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 *
 * SPDX-License-Identifier: GPL-3.0-or-later
 */

//! Solimots: a solitaire where cards are words grouped into categories.
//!
//! `game` holds the deterministic core (level generation and placement
//! rules), `engine` the session state machine around it, `bank` the
//! category content and `console` a headless text front-end.

pub mod bank;
pub mod config;
pub mod console;
pub mod engine;
pub mod error;
pub mod game;
pub mod trace;
