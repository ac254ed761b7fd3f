use clap::Parser;
use std::io::{self, BufRead, Write};
use universal_converter::config::{CliConfig, Command};
use universal_converter::core::Domain;
use universal_converter::utils::{format::format_factor, logger, validation::Validate};
use universal_converter::{
    ConversionResult, ConvertError, ConverterConfig, HistoryExporter, LocalStorage, Session,
    UnitRegistry,
};

/// Exit code for rejected user input.
const EXIT_INVALID_INPUT: i32 = 2;
/// Exit code for configuration problems.
const EXIT_CONFIG: i32 = 1;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(EXIT_CONFIG);
        }
    };

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, config.logging.level.as_deref(), config.logging.format);
    tracing::debug!("CLI config: {:?}", cli);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(EXIT_CONFIG);
    }

    let registry = UnitRegistry::standard();

    match &cli.command {
        Command::Domains => print_domains(registry, cli.json)?,
        Command::Units { domain } => match registry.get_domain(domain) {
            Ok(domain) => print_units(domain, cli.json)?,
            Err(e) => exit_with(&e, cli.json)?,
        },
        Command::Convert {
            value,
            domain,
            from,
            to,
        } => {
            let mut session = Session::from_config(registry, &config)?;
            let domain = domain.clone().unwrap_or_else(|| config.session.default_domain.clone());

            let defaults = match registry.default_units(&domain) {
                Ok(defaults) => defaults,
                Err(e) => return exit_with(&e, cli.json),
            };
            let from = from.clone().unwrap_or(defaults.source);
            let to = to.clone().unwrap_or(defaults.target);

            match session.convert(&domain, value, &from, &to) {
                Ok(result) => print_result(&result, cli.json)?,
                Err(e) => exit_with(&e, cli.json)?,
            }
        }
        Command::Repl { export } => {
            let session = Session::from_config(registry, &config)?;
            run_repl(session, &config, *export)?;
        }
    }

    Ok(())
}

fn print_domains(registry: &UnitRegistry, json: bool) -> anyhow::Result<()> {
    if json {
        let domains: Vec<serde_json::Value> = registry
            .domains()
            .iter()
            .map(|d| {
                serde_json::json!({
                    "name": d.name,
                    "base_unit": d.base_unit(),
                    "allows_negative": d.allows_negative,
                    "units": d.unit_symbols(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&domains)?);
        return Ok(());
    }

    for domain in registry.domains() {
        println!(
            "{:<18} base: {:<6} units: {}",
            domain.name,
            domain.base_unit().unwrap_or("C pivot"),
            domain.unit_count()
        );
    }
    Ok(())
}

fn print_units(domain: &Domain, json: bool) -> anyhow::Result<()> {
    if json {
        let units: Vec<serde_json::Value> = domain
            .unit_symbols()
            .into_iter()
            .map(|u| serde_json::json!({ "symbol": u, "factor": domain.factor(u) }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&units)?);
        return Ok(());
    }

    match domain.base_unit() {
        Some(base) => {
            for symbol in domain.unit_symbols() {
                let factor = domain.factor(symbol).unwrap_or(1.0);
                println!("1 {:<6} = {} {}", symbol, format_factor(factor), base);
            }
        }
        None => {
            for symbol in domain.unit_symbols() {
                println!("{} (converted through Celsius)", symbol);
            }
        }
    }
    Ok(())
}

fn print_result(result: &ConversionResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("Result: {}", result.text);
    for step in result.numbered_steps() {
        println!("  {}", step);
    }
    Ok(())
}

fn print_error(error: &ConvertError, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&error.report())?);
    } else {
        eprintln!("❌ {}", error.user_message());
    }
    Ok(())
}

fn exit_with(error: &ConvertError, json: bool) -> anyhow::Result<()> {
    tracing::debug!("Rejected: {} ({:?})", error, error.kind());
    print_error(error, json)?;
    std::process::exit(EXIT_INVALID_INPUT);
}

#[derive(Debug, PartialEq)]
enum ReplAction {
    Continue,
    Quit,
}

const REPL_HELP: &str = "\
Commands:
  domains            list measurement domains
  domain <name>      switch domain (resets units)
  units              list units of the current domain
  from <unit>        set source unit
  to <unit>          set target unit
  convert <value>    convert with the selected units (a bare value works too)
  history            show successful conversions
  export             write history to the configured output path
  reset              clear history and return to the default domain
  help               show this message
  quit               leave the session";

fn run_repl(mut session: Session<'_>, config: &ConverterConfig, export_on_exit: bool) -> anyhow::Result<()> {
    tracing::info!("Interactive session started in {}", session.domain());
    println!("Universal Converter - type 'help' for commands");
    print_selection(&session);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}> ", session.domain());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match handle_line(&mut session, config, line.trim())? {
            ReplAction::Continue => {}
            ReplAction::Quit => break,
        }
    }

    if export_on_exit {
        export_history(&session, config);
    }
    tracing::info!("Interactive session ended with {} conversions", session.history().len());
    Ok(())
}

fn handle_line(session: &mut Session<'_>, config: &ConverterConfig, line: &str) -> anyhow::Result<ReplAction> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(ReplAction::Continue);
    };
    let argument = parts.next();

    match (command, argument) {
        ("quit" | "exit", _) => return Ok(ReplAction::Quit),
        ("help", _) => println!("{}", REPL_HELP),
        ("domains", _) => println!("{}", session.list_domains().join(", ")),
        ("domain", Some(name)) => match session.select_domain(name) {
            Ok(_) => print_selection(session),
            Err(e) => print_error(&e, false)?,
        },
        ("units", _) => match session.list_units(session.domain()) {
            Ok(units) => println!("{}", units.join(", ")),
            Err(e) => print_error(&e, false)?,
        },
        ("from", Some(unit)) => match session.set_source_unit(unit) {
            Ok(()) => print_selection(session),
            Err(e) => print_error(&e, false)?,
        },
        ("to", Some(unit)) => match session.set_target_unit(unit) {
            Ok(()) => print_selection(session),
            Err(e) => print_error(&e, false)?,
        },
        ("convert", Some(value)) => convert_and_print(session, value)?,
        ("history", _) => {
            if session.history().is_empty() {
                println!("(no conversions yet)");
            }
            for (i, entry) in session.history().iter().enumerate() {
                println!(
                    "{:>3}. [{}] {} {} -> {}",
                    i + 1,
                    entry.domain,
                    entry.input_value,
                    entry.source_unit,
                    entry.result_text
                );
            }
        }
        ("export", _) => export_history(session, config),
        ("reset", _) => {
            session.reset();
            print_selection(session);
        }
        (cmd @ ("domain" | "from" | "to" | "convert"), None) => println!("Usage: {}", usage(cmd)),
        (value, None) => convert_and_print(session, value)?,
        _ => println!("Unknown command '{}'. Type 'help' for commands.", line),
    }

    Ok(ReplAction::Continue)
}

fn convert_and_print(session: &mut Session<'_>, value: &str) -> anyhow::Result<()> {
    match session.convert_input(value) {
        Ok(result) => print_result(&result, false),
        Err(e) => print_error(&e, false),
    }
}

fn usage(command: &str) -> &'static str {
    match command {
        "domain" => "domain <name>",
        "from" => "from <unit>",
        "to" => "to <unit>",
        _ => "convert <value>",
    }
}

fn print_selection(session: &Session<'_>) {
    let units = session.units();
    println!("{}: {} -> {}", session.domain(), units.source, units.target);
}

// 匯出失敗只回報，不結束互動模式
fn export_history(session: &Session<'_>, config: &ConverterConfig) {
    let storage = LocalStorage::new(config.output_path().to_string());
    let base_path = storage.base_path().to_string();

    let written = config.export_formats().and_then(|formats| {
        HistoryExporter::new(storage, formats, config.export.compress).export(session.history())
    });

    match written {
        Ok(written) if written.is_empty() => println!("Nothing to export."),
        Ok(written) => {
            for name in written {
                println!("📁 {}/{}", base_path, name);
            }
        }
        Err(e) => {
            tracing::error!("History export failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
        }
    }
}
