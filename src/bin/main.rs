use std::{io, process::ExitCode};

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use aura::{
    cert::{CertificateIssuer, normalize_domain},
    cli::{Cli, Commands, parse_args},
    config::AuraConfig,
    constants::DEMO_URL,
    error::AuraError,
    installer::{InstallState, Installer, UninstallOutcome},
    logs::stream_logs,
    process::{ProcessRunner, SystemExecutor},
    proxy::ProxyController,
    status::StatusReporter,
};

fn main() -> ExitCode {
    let args = parse_args();
    init_logging(&args);

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(args: &Cli) {
    let filter = if let Some(level) = args.log_level {
        EnvFilter::new(level.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(args: Cli) -> Result<ExitCode, AuraError> {
    let mut config = match AuraConfig::from_env() {
        Ok(config) => config,
        Err(err) if args.command == Commands::Status => {
            warn!("Cannot resolve aura configuration: {err}");
            println!("🔍 Checking Aura proxy status...");
            print_not_running();
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => return Err(err.into()),
    };
    if let Some(dir) = args.state_dir {
        config = config.with_state_dir(dir);
    }
    debug!("Using state directory {}", config.state_dir.display());

    let runner = ProcessRunner::new(SystemExecutor);

    match args.command {
        Commands::Install => {
            println!("🚀 Installing Aura proxy system...");
            Installer::new(&config, &runner).install()?;
            println!("✅ Aura proxy installed successfully!");
            println!("\nNext steps:");
            println!("  1. Start the proxy: aura start");
            println!("  2. Test it: open {DEMO_URL}");
        }
        Commands::Start => {
            println!("🟢 Starting Aura proxy...");
            ProxyController::new(&config, &runner).start()?;
            println!("✅ Aura proxy started!");
            println!("   Test: {DEMO_URL}");
        }
        Commands::Stop => {
            println!("🔴 Stopping Aura proxy...");
            ProxyController::new(&config, &runner).stop()?;
            println!("✅ Aura proxy stopped");
        }
        Commands::Cert { domain } => {
            println!("🔐 Generating certificate for {}...", normalize_domain(&domain));
            let domain = CertificateIssuer::new(&config, &runner).issue(&domain)?;
            println!("✅ Certificate generated for {domain}");
        }
        Commands::Status => print_status(&config, &runner),
        Commands::Logs { follow } => {
            let code = stream_logs(&config, &runner, follow)?;
            return Ok(exit_code(code));
        }
        Commands::Uninstall => {
            let stdin = io::stdin();
            let outcome =
                Installer::new(&config, &runner).uninstall(stdin.lock(), io::stdout())?;
            match outcome {
                UninstallOutcome::NotInstalled => {
                    println!("Aura is not installed; nothing to remove");
                }
                UninstallOutcome::Cancelled => println!("Cancelled"),
                UninstallOutcome::Removed { stop_failed } => {
                    if stop_failed {
                        warn!("Proxy containers may still be running");
                    }
                    println!("✅ Aura proxy uninstalled");
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_status(config: &AuraConfig, runner: &ProcessRunner<SystemExecutor>) {
    println!("🔍 Checking Aura proxy status...");

    match Installer::new(config, runner).state() {
        InstallState::Absent => {
            println!("   Not installed ({})", config.state_dir.display());
        }
        InstallState::Partial {
            missing,
            missing_cert_dir,
        } => {
            let mut names: Vec<&str> = missing.iter().map(|a| a.file_name()).collect();
            if missing_cert_dir {
                names.push("certs/domains");
            }
            println!(
                "   Installation incomplete, missing: {} (re-run `aura install`)",
                names.join(", ")
            );
        }
        InstallState::Installed => {
            println!("   Installed at {}", config.state_dir.display());
        }
    }

    let status = StatusReporter::new(config, runner).status();
    if status.running {
        println!("✅ Aura proxy is running\n");
        println!("{}", status.summary.trim_end());
    } else {
        print_not_running();
    }
}

fn print_not_running() {
    println!("❌ Aura proxy is not running");
    println!("   Start with: aura start");
}

fn exit_code(code: i32) -> ExitCode {
    match u8::try_from(code) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}
