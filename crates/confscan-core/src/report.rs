//! 汇总报告
use serde::Serialize;

use crate::errors::FileError;
use crate::findings::{Finding, SecurityFinding};
use crate::rules::Diagnostics;

/// 单个文件的处理结果
#[derive(Debug)]
pub enum FileOutcome {
    /// 解析成功：规则校验结果 + 安全发现
    Processed { diagnostics: Diagnostics, critical: Vec<SecurityFinding> },
    /// 读取 / 解析失败：只记一条错误，不计入已处理数量
    Failed(FileError),
}

/// 本次运行的汇总（只追加，保持文件发现顺序）
#[derive(Debug, Default)]
pub struct AggregateReport {
    pub critical: Vec<SecurityFinding>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub files_processed: usize,
}

impl AggregateReport {
    pub fn merge(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Processed { diagnostics, critical } => {
                self.errors.extend(diagnostics.errors.iter().map(Finding::to_string));
                self.warnings.extend(diagnostics.warnings.iter().map(Finding::to_string));
                self.critical.extend(critical);
                self.files_processed += 1;
            }
            FileOutcome::Failed(err) => self.errors.push(err.to_string()),
        }
    }

    pub fn summary(&self) -> String {
        format!("Validated {} configuration files.", self.files_processed)
    }

    /// 转为输出结构（对应 stdout 上的 JSON 对象）
    pub fn to_output(&self) -> ReportOutput {
        ReportOutput {
            validation_summary: self.summary(),
            critical_security_findings: self.critical.iter().map(SecurityFinding::to_string).collect(),
            errors_found: self.errors.clone(),
            warnings_found: self.warnings.clone(),
        }
    }
}

/// 报告输出结构
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput {
    pub validation_summary: String,
    pub critical_security_findings: Vec<String>,
    pub errors_found: Vec<String>,
    pub warnings_found: Vec<String>,
}
