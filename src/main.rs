use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use pr_review::aggregate;
use pr_review::cli::args::Args;
use pr_review::config::Config;
use pr_review::models::ReviewComment;
use pr_review::report;
use pr_review::report::markdown::MarkdownFormatter;
use pr_review::report::text::TextFormatter;
use pr_review::service::ReviewClient;
use pr_review::session::{RequestController, SessionState};

fn render_results(args: &Args, results: &[ReviewComment]) -> anyhow::Result<()> {
    let grouped = aggregate::group(results);

    if grouped.is_empty() {
        println!("✅ 没有发现问题 🎉");
    } else {
        let formatted = match args.format.as_str() {
            "json" => report::grouped_json(&grouped)?,
            "markdown" => MarkdownFormatter::new().format(&grouped, &args.pr_url),
            _ => {
                // 写文件时不带颜色
                if args.output.is_some() {
                    TextFormatter::new_no_color().format(&grouped)
                } else {
                    TextFormatter::new().format(&grouped)
                }
            }
        };

        // 输出到文件或控制台
        if let Some(output_file) = &args.output {
            std::fs::write(output_file, &formatted)?;
            println!("✅ 审查报告已保存到: {}", output_file);
        } else {
            println!("{}", formatted);
        }
    }

    // 原始结果导出，未分组
    if args.copy_json {
        println!("{}", report::raw_json(Some(results)));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::new();

    config.update_from_args(&args);
    config.validate()?;

    pr_review::logging::init(config.debug)?;

    let client = ReviewClient::from_config(&config)?;
    let mut controller = RequestController::new(Arc::new(client));

    println!("🔍 正在提交 PR 审查请求: {}", args.pr_url);
    let start_time = Instant::now();
    controller.submit(&args.pr_url).await;
    let elapsed_time = start_time.elapsed();

    if config.debug {
        println!("审查请求耗时: {:.2?}", elapsed_time);
    }

    match &controller.session().state {
        SessionState::Success(results) => {
            render_results(&args, results)?;
        }
        SessionState::Failure(message) => {
            eprintln!("❌ 审查失败: {}", message);
            std::process::exit(1);
        }
        // submit 返回后只会停在 Success 或 Failure
        _ => {}
    }

    Ok(())
}
