use anyhow::{bail, Context};
use clap::Parser;
use kg_explorer::config::Command;
use kg_explorer::core::{
    InfoSheet, MapController, QueryConsole, ResultsPager, SampleQueries, SearchController,
    SuggestionController,
};
use kg_explorer::domain::model::{SearchParams, SparqlQueryRequest};
use kg_explorer::domain::ports::Storage;
use kg_explorer::utils::error::ErrorSeverity;
use kg_explorer::utils::{logger, validation};
use kg_explorer::{export, render, AppConfig, CliConfig, KgError, LocalStorage, Services};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI args: {:?}", cli);

    // 載入並驗證配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(e.severity()));
        }
    };

    if let Err(e) = run(cli.command, &config).await {
        match e.downcast_ref::<KgError>() {
            Some(kg) => {
                tracing::error!(
                    "Command failed: {} (Category: {:?}, Severity: {:?})",
                    kg,
                    kg.category(),
                    kg.severity()
                );
                eprintln!("❌ {}", kg.user_friendly_message());
                eprintln!("💡 {}", kg.recovery_suggestion());

                let code = exit_code(kg.severity());
                if code > 0 {
                    std::process::exit(code);
                }
            }
            None => {
                tracing::error!("Command failed: {:#}", e);
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

// 根據錯誤嚴重程度決定退出碼
fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

/// Controllers keep failures as state; the CLI turns them back into errors.
fn surface(error: &Option<String>) -> Result<(), KgError> {
    match error {
        Some(message) => Err(KgError::service(message.clone())),
        None => Ok(()),
    }
}

async fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    let services = Services::from_config(config)?;

    match command {
        Command::Search {
            query,
            entity_type,
            page,
            page_size,
        } => {
            config.require_search()?;
            let mut search = SearchController::with_page_size(services.search, page_size);
            search
                .search(SearchParams {
                    entity_type,
                    page: Some(page),
                    page_size: Some(page_size),
                    ..SearchParams::new(query)
                })
                .await;
            surface(&search.error)?;
            print!("{}", render::search_results(&search));
        }
        Command::Suggest { query } => {
            config.require_search()?;
            suggest(services, config, query).await?;
        }
        Command::Entity { id, by_label, year } => {
            let mut sheet = InfoSheet::new(services.infobox);
            sheet.open(&id, by_label).await;
            surface(&sheet.error().map(str::to_string))?;

            if let Some(year) = year {
                if !sheet.select_year(year) {
                    tracing::warn!(
                        "No health metrics for {}, showing {:?}",
                        year,
                        sheet.selected_year()
                    );
                }
            }
            print!("{}", render::info_panel(&sheet));
        }
        Command::Related { id, limit } => {
            let related = services.infobox.related_entities(&id, limit).await?;
            print!("{}", render::related_entities(&related));
        }
        Command::Map { svg, country } => {
            config.require_map()?;
            let mut map = MapController::new(services.map);
            map.load().await;
            if map.using_fallback {
                println!("⚠️  Map API unavailable, showing built-in country positions");
            }

            if let Some(iso3) = country {
                config.require_search()?;
                let marker = map.marker_at(&iso3).ok_or_else(|| KgError::NotFound {
                    what: format!("country {}", iso3),
                })?;
                let mut search = SearchController::new(services.search);
                search.search(SearchParams::new(marker.label)).await;
                surface(&search.error)?;
                print!("{}", render::search_results(&search));
            } else if let Some(file) = svg {
                let storage = LocalStorage::new(config.export.output_dir.clone());
                let path = storage.write_file(&file, map.render_svg().as_bytes()).await?;
                println!("📁 Map saved to: {}", path);
            } else {
                print!("{}", render::map_markers(&map.markers()));
            }
        }
        Command::Query {
            sparql,
            file,
            page,
            limit,
            export: export_csv,
        } => {
            let text = match (sparql, file) {
                (Some(text), _) => text,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("failed to read query file {}", path.display()))?,
                (None, None) => {
                    let mut buf = String::new();
                    tokio::io::stdin()
                        .read_to_string(&mut buf)
                        .await
                        .context("failed to read query from stdin")?;
                    buf
                }
            };
            if text.trim().is_empty() {
                bail!("no query given; pass it as an argument, with --file, or on stdin");
            }

            let mut request = SparqlQueryRequest::new(text);
            request.limit = limit;

            let mut console = QueryConsole::new(services.sparql);
            console.execute(request).await;
            surface(&console.error)?;

            let total = console.results.as_ref().map_or(0, |r| r.len());
            let mut pager = ResultsPager::with_page_size(total, config.query.page_size);
            pager.set_page(page);
            print!("{}", render::query_results(&console, &pager));

            if export_csv {
                if let Some(results) = &console.results {
                    let storage = LocalStorage::new(config.export.output_dir.clone());
                    let path = export::export_results(&storage, results).await?;
                    println!("📁 CSV saved to: {}", path);
                }
            }
        }
        Command::Validate { sparql } => {
            validation::validate_non_empty_string("query", &sparql)?;
            let result = services.sparql.validate_query(&sparql).await?;
            if result.valid {
                println!("✅ Query is valid");
            } else {
                return Err(KgError::Validation {
                    message: result
                        .error
                        .unwrap_or_else(|| "Query is not valid".to_string()),
                }
                .into());
            }
        }
        Command::Samples => {
            let mut samples = SampleQueries::new(services.sparql);
            samples.load().await;
            if let Some(error) = &samples.error {
                println!("⚠️  {} (showing built-in samples)", error);
            }
            print!("{}", render::sample_queries(&samples.samples));
        }
        Command::History => {
            let history = services.sparql.query_history().await?;
            print!("{}", render::query_history(&history));
        }
    }

    Ok(())
}

/// One-shot with an argument; otherwise every stdin line is fed through the
/// debouncer and the suggestions for the settled input are printed.
async fn suggest(
    services: Services,
    config: &AppConfig,
    query: Option<String>,
) -> anyhow::Result<()> {
    let delay = Duration::from_millis(config.query.debounce_ms);
    let mut controller = SuggestionController::with_debounce(services.search, delay);

    let last = match query {
        Some(query) => {
            controller.fetch_now(&query).await;
            query
        }
        None => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut last = String::new();
            while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
                controller.on_input(line.trim());
                last = line.trim().to_string();
            }

            // 等待最後一次輸入的請求完成
            let wait = delay + Duration::from_millis(config.api.timeout_ms);
            let settled = tokio::time::timeout(wait, async {
                loop {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    let state = controller.snapshot().await;
                    if !controller.is_pending() && !state.is_loading && state.query == last {
                        break;
                    }
                }
            })
            .await;
            if settled.is_err() {
                tracing::warn!("Timed out waiting for suggestions");
            }
            last
        }
    };

    let state = controller.snapshot().await;
    surface(&state.error)?;
    if state.suggestions.is_empty() {
        println!("No suggestions for '{}'", last);
    }
    for entity in &state.suggestions {
        match &entity.iso3_code {
            Some(code) => println!("{} [{}]  ({})", entity.label, code, entity.entity_type),
            None => println!("{}  ({})", entity.label, entity.entity_type),
        }
    }
    Ok(())
}
