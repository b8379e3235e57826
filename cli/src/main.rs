// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! versit - write vCard and iCalendar files from TOML descriptions

use std::process::ExitCode;

fn main() -> ExitCode {
    versit_cli::run()
}
