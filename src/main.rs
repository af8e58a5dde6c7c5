use chrono::{DateTime, Local};
use clap::Parser;
use rocks_id::config::Command;
use rocks_id::core::ConfigProvider;
use rocks_id::index::{NameNumberIndex, INDEX_FILE};
use rocks_id::utils::error::ErrorSeverity;
use rocks_id::utils::{export, logger, validation::Validate};
use rocks_id::{
    CliConfig, Identifier, QuaeroClient, ResolveOptions, Resolver, ResolverEngine, RocksError,
    Settings,
};
use std::fs;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }

    let monitor = cli.monitor;
    let outcome = match cli.command {
        Command::Id {
            identifiers,
            ids,
            remote_only,
            progress,
            output,
        } => {
            run_id(
                &settings,
                identifiers,
                ids,
                remote_only,
                progress,
                output,
                monitor,
            )
            .await
        }
        Command::Status => run_status(&settings),
        Command::Update { index_url } => run_update(&settings, index_url).await,
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let code = exit_code(&e);
        if code > 0 {
            std::process::exit(code);
        }
    }

    Ok(())
}

fn exit_code(error: &RocksError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

async fn run_id(
    settings: &Settings,
    identifiers: Vec<String>,
    ids: bool,
    remote_only: bool,
    progress: bool,
    output: Option<String>,
    monitor: bool,
) -> rocks_id::Result<()> {
    // 壞掉的索引不應擋住解析，改用遠端查詢
    let index = match NameNumberIndex::load_from_cache(settings.cache_dir()) {
        Ok(index) => index,
        Err(e) => {
            tracing::warn!("Local index unusable ({}), continuing without it", e);
            None
        }
    };

    let client = QuaeroClient::from_config(settings)?;
    let resolver = Resolver::new(index, client);
    let engine = ResolverEngine::new_with_monitoring(resolver, monitor);

    let options = ResolveOptions {
        return_id: ids || settings.return_id,
        try_local_first: !remote_only && settings.try_local_first,
        show_progress: progress || settings.show_progress,
    };

    let inputs: Vec<Identifier> = identifiers.iter().map(Identifier::from).collect();
    let results = engine.run(inputs, &options).await?;

    for (input, resolution) in identifiers.iter().zip(&results) {
        match (&resolution.id, options.return_id) {
            (Some(id), true) => println!("{} -> {} [{}]", input, resolution, id),
            _ => println!("{} -> {}", input, resolution),
        }
    }

    if let Some(path) = output {
        export::write_csv(Path::new(&path), &results)?;
        println!("📁 Results saved to: {}", path);
    }

    Ok(())
}

fn run_status(settings: &Settings) -> rocks_id::Result<()> {
    let cache_dir = settings.cache_dir();
    println!("Cache directory: {}", cache_dir.display());

    let path = cache_dir.join(INDEX_FILE);
    if !path.is_file() {
        println!("No name/number index cached, run 'rocks-id update' to fetch one");
        return Ok(());
    }

    let index = NameNumberIndex::load(&path)?;
    let modified: DateTime<Local> = fs::metadata(&path)?.modified()?.into();

    println!("Name/number index [{}]:", INDEX_FILE);
    println!("  {} bodies", index.len());
    println!("  built {}", index.built().format("%d %b %Y"));
    println!("  updated on {}", modified.format("%d %b %Y"));
    Ok(())
}

async fn run_update(settings: &Settings, index_url: Option<String>) -> rocks_id::Result<()> {
    let url = index_url.unwrap_or_else(|| settings.index_url());
    let client = QuaeroClient::from_config(settings)?;

    tracing::info!("Fetching name/number index from {}", url);
    let raw = client.fetch_index(&url).await?;
    let path = NameNumberIndex::install(settings.cache_dir(), &raw)?;
    let index = NameNumberIndex::load(&path)?;

    println!("✅ Index updated: {} bodies", index.len());
    println!("📁 Installed at: {}", path.display());
    Ok(())
}
