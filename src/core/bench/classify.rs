//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use crate::core::lang::vhdl::port::Port;

/// The roles assigned to an entity's ports. Ports are referenced by their
/// index in declaration order.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Classification {
    clock: Option<usize>,
    reset: Option<usize>,
    reset_active_low: bool,
}

impl Classification {
    pub fn clock(&self) -> Option<usize> {
        self.clock
    }

    pub fn reset(&self) -> Option<usize> {
        self.reset
    }

    pub fn is_reset_active_low(&self) -> bool {
        self.reset_active_low
    }

    /// Checks if the port at `index` is the clock or the reset.
    pub fn is_control(&self, index: usize) -> bool {
        self.clock == Some(index) || self.reset == Some(index)
    }
}

/// Only single-bit or boolean inputs can be toggled by a generated process.
fn is_drivable(port: &Port) -> bool {
    port.mode().is_input() && port.data_type().is_scalar_bit()
}

fn is_clock_name(name: &str) -> bool {
    name.starts_with("clk") || name.starts_with("clock")
}

fn is_reset_name(name: &str) -> bool {
    name.contains("rst") || name.contains("reset")
}

fn is_active_low(name: &str) -> bool {
    name.ends_with("_n") || name.ends_with("rstn") || name.ends_with("resetn")
}

/// Picks out the clock and the reset among `ports` by name.
///
/// The first matching port in declaration order wins each role, and a port
/// claimed as the clock is never also the reset.
pub fn classify(ports: &[Port]) -> Classification {
    let clock = ports
        .iter()
        .position(|p| is_drivable(p) && is_clock_name(&p.name().to_lowercase()));

    let reset = ports.iter().enumerate().position(|(i, p)| {
        Some(i) != clock && is_drivable(p) && is_reset_name(&p.name().to_lowercase())
    });

    let reset_active_low = reset
        .and_then(|i| ports.get(i))
        .map_or(false, |p| is_active_low(&p.name().to_lowercase()));

    let result = Classification {
        clock,
        reset,
        reset_active_low,
    };
    log::debug!(
        "classified clock: {:?}, reset: {:?} (active low: {})",
        result.clock.map(|i| ports[i].name().to_string()),
        result.reset.map(|i| ports[i].name().to_string()),
        result.reset_active_low
    );
    result
}
