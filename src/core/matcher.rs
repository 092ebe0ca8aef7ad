use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

// 内容嗅探上限：只读文件开头一小段
const SNIFF_BYTES: u64 = 2048;
// 只在前几个非空行里找标题命中
const SNIFF_LINES: usize = 6;

/// 归一化：转小写，仅保留 ASCII 字母、数字与空格，用于模糊比较
pub fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

// 文件名比较键：归一化后再去掉空格
fn normalize_key(s: &str) -> String {
    normalize(s).replace(' ', "")
}

fn base_key(path: &Path) -> String {
    let base = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    normalize_key(base)
}

/// 在 content/<category> 下寻找与 topic 匹配的文件，返回命中路径
/// 匹配优先级：文件名全等 > 前缀 > 子串 > 文件开头标题命中
/// 每一级在全部候选上穷举后才降级；类目目录不存在视为未命中
pub fn find_matching_file(content_root: &Path, category: &str, topic: &str) -> Option<PathBuf> {
    let cat_folder = content_root.join(category.to_lowercase());
    if !cat_folder.is_dir() {
        return None;
    }

    let topic_key = normalize_key(topic);

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(&cat_folder).ok()?.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let ext_ok = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_lowercase().as_str(), "md" | "txt"))
            .unwrap_or(false);
        if ext_ok {
            candidates.push(path);
        }
    }
    // 目录序不稳定，按文件名排序保证同级命中的确定性
    candidates.sort();

    for p in &candidates {
        if base_key(p) == topic_key {
            return Some(p.clone());
        }
    }
    for p in &candidates {
        if base_key(p).starts_with(&topic_key) {
            return Some(p.clone());
        }
    }
    for p in &candidates {
        if base_key(p).contains(&topic_key) {
            return Some(p.clone());
        }
    }

    // 文件名全部未命中时，退回检查文件开头是否出现 topic 原文
    let topic_lower = topic.to_lowercase();
    candidates
        .iter()
        .find(|p| head_lines_contain(p.as_path(), &topic_lower))
        .cloned()
}

// 读失败一律按未命中处理
fn head_lines_contain(path: &Path, topic_lower: &str) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut buf = Vec::new();
    if file.take(SNIFF_BYTES).read_to_end(&mut buf).is_err() {
        return false;
    }
    let head = String::from_utf8_lossy(&buf);
    head.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(SNIFF_LINES)
        .any(|l| l.to_lowercase().contains(topic_lower))
}
