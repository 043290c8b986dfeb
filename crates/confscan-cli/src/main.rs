use anyhow::{Context, Result};
use clap::Parser;
use confscan_core::{load_options_file, validate_tree, ValidateOptions};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "confscan", version, about = "配置目录校验与敏感内容扫描")]
struct Cli {
    /// 配置根目录（递归查找 config.json）
    root: Option<PathBuf>,

    /// 敏感内容扫描目标（大小写不敏感）；缺省则不扫描
    target: Option<String>,

    /// 线程数（"auto"=CPU 核心数，1 为串行）
    #[arg(long)]
    threads: Option<String>,

    /// 需要校验的文件名（精确匹配），默认 config.json
    #[arg(long)]
    file_name: Option<String>,

    /// 最大文件大小（单位字节），超过则记为错误
    #[arg(long)]
    max_file_size: Option<u64>,

    /// 选项文件路径（TOML），命令行参数优先
    #[arg(long)]
    options: Option<PathBuf>,

    /// 报告输出文件；缺省写到 stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// 格式化输出 JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    // 缺少根目录：输出错误对象并以非零状态退出
    let root = match cli.root.clone() {
        Some(root) => root,
        None => {
            println!("{}", serde_json::json!({ "error": "No configuration directory path was provided." }));
            std::process::exit(1);
        }
    };

    let opts = build_options(&cli)?;
    info!(?root, threads = ?opts.threads, file_name = %opts.file_name, "starting validation");
    let report = validate_tree(&root, &opts).context("validate configuration tree")?;
    let output = report.to_output();

    // 报告写入文件或 stdout
    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).context("create output file")?)),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    if cli.pretty {
        serde_json::to_writer_pretty(&mut out, &output)?;
    } else {
        serde_json::to_writer(&mut out, &output)?;
    }
    writeln!(out)?;
    out.flush().context("flush report")?;

    info!(files_processed = report.files_processed, "validation report written");
    Ok(())
}

/// 合并选项：默认值 < 选项文件 < 命令行参数
fn build_options(cli: &Cli) -> Result<ValidateOptions> {
    let mut opts = ValidateOptions::default();
    if let Some(path) = &cli.options {
        load_options_file(path)
            .with_context(|| format!("load options file {}", path.display()))?
            .apply(&mut opts);
    }
    if let Some(t) = &cli.target { opts.target = Some(t.clone()); }
    if let Some(n) = &cli.file_name { opts.file_name = n.clone(); }
    if let Some(t) = &cli.threads { opts.threads = parse_threads(t); }
    if let Some(m) = cli.max_file_size { opts.max_file_size = Some(m); }
    Ok(opts)
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，stdout 只留给报告
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析线程参数
fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") { return None; }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}
