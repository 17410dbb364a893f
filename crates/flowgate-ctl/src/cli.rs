//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use flowgate_core::config::{BrokerConfig, ConfigError, FlowgateConfig};

#[derive(Parser, Debug)]
#[command(name = "flowgate-ctl")]
#[command(about = "Operator CLI for the flowgate workflow broker", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub broker: BrokerArgs,

    /// Log transport details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection settings; each one overrides env and config file.
#[derive(Args, Debug, Clone, Default)]
pub struct BrokerArgs {
    /// Broker gateway address, e.g. http://127.0.0.1:26500
    #[arg(long, global = true, value_name = "URL")]
    pub address: Option<String>,

    /// Request deadline in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub request_timeout: Option<u64>,

    /// Config file (default: $FLOWGATE_CONFIG or ~/.config/flowgate/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl BrokerArgs {
    /// Flags → env → file → defaults, validated after every layer is applied.
    pub fn resolve(&self) -> Result<BrokerConfig, ConfigError> {
        let mut broker = match &self.config {
            Some(path) => FlowgateConfig::load_from(path)?.broker,
            None => FlowgateConfig::load()?.broker,
        };
        if let Some(address) = &self.address {
            broker.address = address.clone();
        }
        if let Some(secs) = self.request_timeout {
            broker.request_timeout_secs = secs;
        }
        broker.validate()?;
        Ok(broker)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Complete a resource
    Complete {
        #[command(subcommand)]
        target: CompleteTarget,
    },
}

#[derive(Subcommand, Debug)]
pub enum CompleteTarget {
    /// Complete a job
    #[command(allow_negative_numbers = true)]
    Job(CompleteJobArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CompleteJobArgs {
    /// Key of the job to complete
    #[arg(value_name = "JOB_KEY")]
    pub job_key: String,

    /// Specify payload as JSON object string
    #[arg(long, value_name = "JSON")]
    pub payload: Option<String>,
}
