use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seiops::handler::{select_handlers, HandlerChainFile, HandlerChainSource, PortInfo, QName};
use seiops::source::load_registry;
use seiops::{resolve_class, Config, PolicyVariant, ResolutionResult};

#[derive(Parser)]
#[command(name = "seiops")]
#[command(about = "Service endpoint operation resolver")]
#[command(version)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the operations a service class exposes
    Resolve {
        /// Descriptor file or directory of descriptors
        #[arg(value_name = "DESCRIPTORS")]
        descriptors: PathBuf,

        /// Qualified name of the service class or interface
        #[arg(value_name = "CLASS")]
        class: String,

        /// Exposure rules to apply (legacy or modern); overrides manifest and environment
        #[arg(short, long, value_name = "POLICY")]
        policy: Option<PolicyVariant>,

        /// Resolver manifest with a [resolution] table
        #[arg(short, long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Override the restrict-static toggle of the legacy rules
        #[arg(long, value_name = "BOOL")]
        restrict_static: Option<bool>,
    },

    /// List the classes a set of descriptors defines
    Classes {
        /// Descriptor file or directory of descriptors
        #[arg(value_name = "DESCRIPTORS")]
        descriptors: PathBuf,
    },

    /// Show the handlers configured for a port
    Handlers {
        /// Handler-chain descriptor
        #[arg(value_name = "FILE")]
        descriptor: PathBuf,

        /// Service name, as {namespace}local
        #[arg(long, value_name = "QNAME")]
        service: String,

        /// Port name, as {namespace}local
        #[arg(long, value_name = "QNAME")]
        port: String,

        /// Binding URI or token such as ##SOAP11_HTTP
        #[arg(long, value_name = "BINDING", default_value = "##SOAP11_HTTP")]
        binding: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match &cli.command {
        Commands::Resolve { descriptors, class, policy, manifest, restrict_static } => {
            let mut config = Config::load(manifest.as_deref())?;
            if let Some(policy) = policy {
                config = config.with_policy(*policy);
            }
            if let Some(restrict_static) = restrict_static {
                config = config.with_restrict_static(*restrict_static);
            }
            resolve_operations(descriptors, class, &config)?;
        }
        Commands::Classes { descriptors } => {
            list_classes(descriptors)?;
        }
        Commands::Handlers { descriptor, service, port, binding } => {
            show_handlers(descriptor, service, port, binding)?;
        }
    }

    Ok(())
}

fn resolve_operations(descriptors: &PathBuf, class: &str, config: &Config) -> Result<()> {
    let registry = load_registry(descriptors)
        .with_context(|| format!("loading descriptors from {}", descriptors.display()))?;
    let result = resolve_class(class, &registry, config)?;
    print_result(&result);
    Ok(())
}

fn print_result(result: &ResolutionResult) {
    println!("{} ({:?}, {} rules): {} operation(s)", result.root, result.mode, result.policy, result.len());
    for op in result {
        let declaring = op.declaring_class().unwrap_or("?");
        let mut line = format!("  {}#{} -> {}", declaring, op.signature(), op.operation_name());
        if !op.action().is_empty() {
            line.push_str(&format!(" [action {}]", op.action()));
        }
        if !op.faults.is_empty() {
            line.push_str(&format!(" throws {}", op.faults.join(", ")));
        }
        println!("{}", line);
    }
    for diagnostic in &result.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }
}

fn list_classes(descriptors: &PathBuf) -> Result<()> {
    let registry = load_registry(descriptors)
        .with_context(|| format!("loading descriptors from {}", descriptors.display()))?;
    for name in registry.names() {
        if let Some(node) = registry.get(name) {
            let kind = if node.is_interface() { "interface" } else { "class" };
            let service = if node.is_service_annotated() { " @service" } else { "" };
            if node.super_name().is_empty() {
                println!("{} {}{}", kind, name, service);
            } else {
                println!("{} {} extends {}{}", kind, name, node.super_name(), service);
            }
        }
    }
    Ok(())
}

fn show_handlers(descriptor: &PathBuf, service: &str, port: &str, binding: &str) -> Result<()> {
    let chains = HandlerChainFile::new(descriptor).handler_chains()?;
    let port_info = PortInfo {
        service: QName::parse_clark(service)?,
        port: QName::parse_clark(port)?,
        binding: binding.to_string(),
    };
    let selection = select_handlers(&chains, &port_info);
    for class in &selection.handler_classes {
        println!("handler {}", class);
    }
    for role in &selection.soap_roles {
        println!("role {}", role);
    }
    Ok(())
}
