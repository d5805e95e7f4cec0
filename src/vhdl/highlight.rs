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

use colored::ColoredString;
use colored::Colorize;
use palette::*;

pub type Rgb = (u8, u8, u8);

pub fn color(s: &str, hue: (u8, u8, u8)) -> ColoredString {
    s.truecolor(hue.0, hue.1, hue.2)
}

mod palette {
    use super::*;

    // reds
    pub const GOLDEN_ROD: Rgb = (0xDA, 0xA5, 0x20);
    pub const FIREBRICK: Rgb = (0xB2, 0x22, 0x22);

    // blues
    pub const DARK_CYAN: Rgb = (0x00, 0x8B, 0x8B);
}

/* diagnostic colorings */
pub const ERROR_LABEL: Rgb = FIREBRICK;
pub const WARNING_LABEL: Rgb = GOLDEN_ROD;
pub const LOCATION: Rgb = DARK_CYAN;
