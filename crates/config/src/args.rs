// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to .env file (e.g., .env.local)
    #[arg(short, long, default_value = ".env")]
    pub env_file: String,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_env_file() {
        let args = Args::parse_from(["lcd-rest-api"]);
        assert_eq!(args.env_file, ".env");
    }

    #[test]
    fn test_custom_env_file() {
        let args = Args::parse_from(["lcd-rest-api", "--env-file", ".env.test"]);
        assert_eq!(args.env_file, ".env.test");
    }
}
