/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::{error::ErrorKind, Parser};
use env_logger::Env;
use kingrow::{Engine, EngineCommand};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut engine = Engine::new();

    // Skip the executable name
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    // Commands may be chained on the command line, so find the longest prefix that parses, then repeat
    let mut arg_idx = args.len();
    let mut parsed_idx = 0;
    while parsed_idx < arg_idx {
        let slice = &args[parsed_idx..arg_idx];

        match EngineCommand::try_parse_from(slice) {
            Ok(cmd) => {
                engine.send_command(cmd);
                parsed_idx = arg_idx;
                arg_idx = args.len();
            }

            // Edge case: `--help` and `--version` are both "error" cases according to Clap
            Err(e)
                if matches!(e.kind(), ErrorKind::DisplayHelp)
                    || matches!(e.kind(), ErrorKind::DisplayVersion) =>
            {
                println!("{e}");
                parsed_idx = arg_idx;
                arg_idx = args.len();
            }

            Err(e) => {
                log::debug!("Could not parse {slice:?} as a command: {e}");
                arg_idx -= 1;

                // Nothing starting here parses, so skip the offending word
                if arg_idx == parsed_idx {
                    eprintln!("Ignoring unrecognized argument {:?}", args[parsed_idx]);
                    parsed_idx += 1;
                    arg_idx = args.len();
                }
            }
        }
    }

    if let Err(e) = engine.run() {
        eprintln!("{} encountered an error: {e}", env!("CARGO_PKG_NAME"));
    }
}
