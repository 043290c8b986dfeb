//! 目录遍历、单文件流水线与并行调度
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::dialect::parse_document;
use crate::errors::FileError;
use crate::options::ValidateOptions;
use crate::report::{AggregateReport, FileOutcome};
use crate::rules::validate_document;
use crate::sensitive::scan_sensitive;

/// 递归收集 `root` 下文件名与 `file_name` 完全相同的文件
/// 按文件名排序遍历，保证发现顺序可复现
/// 不进入链接目录；指向文件的链接（包括失效链接）按普通文件收集，失效链接随后记为读取错误
pub fn discover_config_files(root: &Path, file_name: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_name().to_str() != Some(file_name) {
            continue;
        }
        if entry.file_type().is_file() || (entry.path_is_symlink() && !links_to_dir(entry.path())) {
            files.push(entry.into_path());
        }
    }
    files
}

/// 链接目标是否为目录（失效链接视为非目录）
fn links_to_dir(path: &Path) -> bool {
    std::fs::metadata(path).map(|md| md.is_dir()).unwrap_or(false)
}

/// 单文件流水线：读取 → 剥离注释 → 解析 → 规则校验 + 敏感内容扫描
/// 任一步失败都只影响当前文件，且不产生部分校验结果
pub fn process_file(path: &Path, opts: &ValidateOptions) -> FileOutcome {
    match run_pipeline(path, opts) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(path = %err.path().display(), error = %err, "file failed");
            FileOutcome::Failed(err)
        }
    }
}

fn run_pipeline(path: &Path, opts: &ValidateOptions) -> Result<FileOutcome, FileError> {
    let io_err = |source: std::io::Error| FileError::Io { path: path.to_path_buf(), source };
    if let Some(limit) = opts.max_file_size {
        let size = std::fs::metadata(path).map_err(io_err)?.len();
        if size > limit {
            return Err(FileError::TooLarge { path: path.to_path_buf(), size, limit });
        }
    }
    let text = std::fs::read_to_string(path).map_err(io_err)?;
    let doc = parse_document(path, &text)?;

    let diagnostics = validate_document(&doc, path);
    let critical = scan_sensitive(&doc, path, opts.target());
    debug!(
        path = %path.display(),
        errors = diagnostics.errors.len(),
        warnings = diagnostics.warnings.len(),
        critical = critical.len(),
        "file validated"
    );
    Ok(FileOutcome::Processed { diagnostics, critical })
}

/// 校验目录并返回汇总报告
/// 稳定性保证：无论串行还是并行，结果都按文件发现顺序合并
pub fn validate_tree(root: &Path, opts: &ValidateOptions) -> Result<AggregateReport> {
    if let Some(target) = opts.target() {
        info!(sensitive_target = target, "searching for sensitive content");
    }
    let files = discover_config_files(root, &opts.file_name);
    info!(root = %root.display(), files = files.len(), "discovered configuration files");

    // 决策：线程数>1 且文件数>1 时走并行调度；否则串行
    let threads = opts.threads.unwrap_or_else(num_cpus::get);
    let mut report = AggregateReport::default();
    if threads > 1 && files.len() > 1 {
        validate_parallel(&files, opts, threads, &mut report)?;
    } else {
        for path in &files {
            report.merge(process_file(path, opts));
        }
    }

    info!(
        files_processed = report.files_processed,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        critical = report.critical.len(),
        "validation finished"
    );
    Ok(report)
}

/// 并行调度：
/// - Rayon 线程池并行处理各文件
/// - 当前线程按 idx 重排后合并，保证与串行结果一致
fn validate_parallel(
    files: &[PathBuf],
    opts: &ValidateOptions,
    threads: usize,
    report: &mut AggregateReport,
) -> Result<()> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;
    use std::collections::BTreeMap;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let (tx, rx) = channel::bounded::<(usize, FileOutcome)>(256);

    std::thread::scope(|scope| {
        scope.spawn(move || {
            pool.install(|| {
                files.par_iter().enumerate().for_each_with(tx, |tx, (idx, path)| {
                    let _ = tx.send((idx, process_file(path, opts)));
                });
            });
            // 结束后 Sender 全部被丢弃，Receiver 将收到关闭信号
        });

        let mut next_idx: usize = 0;
        let mut buffer: BTreeMap<usize, FileOutcome> = BTreeMap::new();
        while let Ok((idx, outcome)) = rx.recv() {
            buffer.insert(idx, outcome);
            while let Some(outcome) = buffer.remove(&next_idx) {
                report.merge(outcome);
                next_idx += 1;
            }
        }
    });

    Ok(())
}
