// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front-end of the `versit` writer.

mod cli;
mod cmd_encode;
mod cmd_generate_completion;
mod config;
mod input;

pub use crate::cli::{Cli, Commands, run};
pub use crate::cmd_encode::CmdEncode;
pub use crate::cmd_generate_completion::CmdGenerateCompletion;
pub use crate::config::{Config, parse_config};
pub use crate::input::parse_documents;
