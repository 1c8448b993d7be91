use chrono::Utc;
use clap::Parser;
use skill_sheet::{cache, cli, config, error, export, inspect, loader, pipeline, sheets};
use cache::SkillCache;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use tracing_subscriber::EnvFilter;

/// ログは標準エラーへ（標準出力はJSON専用）
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Parse { input, format, sheet, output, no_adjust } => {
            eprintln!("📄 skill-sheet - スキル集計\n");

            eprintln!("[1/2] シートを読み込み中...");
            let grid = loader::load_grid(&input, format, sheet.as_deref())?;
            eprintln!("✔ {}行を読み込み\n", grid.len());

            eprintln!("[2/2] スキル集計中...");
            let skills = pipeline::build_skills(&grid, !no_adjust, config.category_overrides.as_deref())?;
            eprintln!("✔ {}件のスキルを検出\n", skills.len());

            export::write_skills(&skills, output.as_deref())?;
        }

        Commands::Fetch { source, output, no_cache, cache_dir, no_adjust } => {
            eprintln!("📥 skill-sheet - スプレッドシート取得\n");

            let spreadsheet_id = config.get_spreadsheet_id()?;
            let cache_dir = cache_dir.unwrap_or_else(Config::cache_dir);

            // 同じスプレッドシートのキャッシュだけを使う
            let cached = if no_cache {
                None
            } else {
                Some(SkillCache::load(&cache_dir)).filter(|c| c.matches(&spreadsheet_id))
            };

            let raw_skills = match &cached {
                Some(c) if c.is_fresh(Utc::now(), config.cache_ttl_seconds) => {
                    eprintln!("✔ キャッシュを使用 ({}件, {}取得)\n", c.len(), c.fetched_at.to_rfc3339());
                    c.skills.clone()
                }
                _ => {
                    eprintln!("[1/2] 取得中... (source: {})", source);
                    match sheets::fetch_grid(&config, source).await {
                        Ok(fetched) => {
                            eprintln!("✔ {}行を取得 ({})\n", fetched.grid.len(), fetched.origin());

                            eprintln!("[2/2] スキル集計中...");
                            let skills = pipeline::build_skills(&fetched.grid, false, None)?;
                            eprintln!("✔ {}件のスキルを検出\n", skills.len());

                            let entry = SkillCache::new(&spreadsheet_id, fetched.source.as_str(), skills);
                            if let Err(e) = entry.save(&cache_dir) {
                                tracing::warn!("キャッシュを保存できません: {}", e);
                            }
                            entry.skills
                        }
                        Err(e) => match cached {
                            Some(c) => {
                                tracing::warn!("取得に失敗したため期限切れのキャッシュを使用します: {}", e);
                                c.skills
                            }
                            None => return Err(e),
                        },
                    }
                }
            };

            let skills = if no_adjust {
                raw_skills
            } else {
                pipeline::adjust_skills(&raw_skills, config.category_overrides.as_deref())?
            };

            export::write_skills(&skills, output.as_deref())?;
        }

        Commands::Summary { input } => {
            let skills = export::read_skills(&input)?;
            print!("{}", export::format_summary(&skills));
        }

        Commands::Inspect { tokens, default_category } => {
            let reports: Vec<_> = tokens
                .iter()
                .map(|t| inspect::inspect_token(t, default_category))
                .collect();
            print!("{}", inspect::format_report(&reports));
        }

        Commands::Config { set_sheet_id, set_gid, set_token_command, show } => {
            let mut config = config;

            if let Some(id) = set_sheet_id {
                config.set_spreadsheet(&id)?;
                println!("✔ スプレッドシートIDを設定しました");
            }

            if let Some(gid) = set_gid {
                config.set_sheet_gid(gid)?;
                println!("✔ gidを設定しました");
            }

            if let Some(command) = set_token_command {
                config.set_token_command(command)?;
                println!("✔ トークンコマンドを設定しました");
            }

            if show {
                println!("設定:");
                println!("  スプレッドシートID: {}", config.spreadsheet_id.as_deref().unwrap_or("未設定"));
                println!("  gid: {}", config.sheet_gid.as_deref().unwrap_or("未設定"));
                println!("  シート名: {}", config.sheet_name);
                println!("  アクセストークン: {}", if config.access_token.is_some() { "設定済み" } else { "未設定" });
                println!("  トークンコマンド: {}", config.token_command.as_deref().unwrap_or("未設定"));
                println!("  キャッシュ有効期間: {}秒", config.cache_ttl_seconds);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                if let Some(path) = &config.category_overrides {
                    println!("  カテゴリ上書き: {}", path.display());
                }
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(Config::cache_dir);
            let cache_path = SkillCache::cache_path(&target);

            if info || !clear {
                if cache_path.exists() {
                    let cache = SkillCache::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  スプレッドシートID: {}", cache.spreadsheet_id);
                    println!("  取得元: {}", cache.source);
                    println!("  取得日時: {}", cache.fetched_at.to_rfc3339());
                    println!("  件数: {}", cache.len());
                    println!(
                        "  状態: {}",
                        if cache.is_fresh(Utc::now(), config.cache_ttl_seconds) { "有効" } else { "期限切れ" }
                    );
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match SkillCache::clear(&target) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}
