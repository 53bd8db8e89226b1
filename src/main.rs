extern crate anyhow;
extern crate cfg_if;
extern crate clap;
extern crate serde;
extern crate serde_json;
extern crate thiserror;

#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "tracing")] {
                $($body)*
            }
        }
    };
}

#[macro_export]
macro_rules! if_not_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(not(feature = "tracing"))] {
                $($body)*
            }
        }
    };
}

if_tracing! {
    use tracing_subscriber::{EnvFilter, fmt};
}

use std::{env, process};

mod cli;
mod codec;
mod diagnostics;
mod huffman;

fn main() {
    if_tracing! {
        let subscriber = fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    process::exit(cli::run(env::args_os()));
}
