use regex::Regex;

// 返回要点数量上限
pub const MAX_BULLETS: usize = 10;
// 低于此长度的句子按残片丢弃
const MIN_SENTENCE_CHARS: usize = 20;
// 段落切不出合格句子时，退回取段首字符数
const PARA_FALLBACK_CHARS: usize = 200;
// 单段落最多贡献的要点数，防止长段落吃满额度
const BULLETS_PER_PARAGRAPH: usize = 2;

/// 将 markdown/纯文本文档压缩为不超过 MAX_BULLETS 条的要点块
/// 流程：去除标记 -> 按空行分段 -> 逐段取 1~2 个短句 -> 加 • 前缀拼接
pub fn markdown_to_bullets(text: &str) -> String {
    let cleaned = strip_markup(text);
    let ws = Regex::new(r"\s+").unwrap();

    let mut bullets: Vec<String> = Vec::new();
    for para in cleaned.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        let mut sents: Vec<String> = split_sentences(para)
            .into_iter()
            .map(str::trim)
            .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
            .map(str::to_string)
            .collect();
        if sents.is_empty() {
            sents = vec![para.chars().take(PARA_FALLBACK_CHARS).collect()];
        }
        for s in sents.iter().take(BULLETS_PER_PARAGRAPH) {
            bullets.push(ws.replace_all(s, " ").trim().to_string());
            if bullets.len() >= MAX_BULLETS {
                break;
            }
        }
        if bullets.len() >= MAX_BULLETS {
            break;
        }
    }

    // 全程一条都没切出来时逐行兜底
    if bullets.is_empty() {
        for ln in cleaned.lines().map(str::trim) {
            if ln.chars().count() > MIN_SENTENCE_CHARS {
                bullets.push(ln.to_string());
                if bullets.len() >= MAX_BULLETS {
                    break;
                }
            }
        }
    }

    bullets
        .iter()
        .map(|b| format!("• {}", b))
        .collect::<Vec<_>>()
        .join("\n")
}

// 按固定顺序剥掉 markdown 标记：代码块、图片、标题、列表、链接，再折叠空行
fn strip_markup(text: &str) -> String {
    let code_fence = Regex::new(r"(?s)```.*?```").unwrap();
    let image = Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap();
    let heading = Regex::new(r"(?m)^#{1,6}\s*").unwrap();
    let list_marker = Regex::new(r"(?m)^\s*[-*+]\s+").unwrap();
    let link = Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap();
    let blank_runs = Regex::new(r"\n{2,}").unwrap();

    let text = code_fence.replace_all(text, "");
    let text = image.replace_all(&text, "");
    let text = heading.replace_all(&text, "");
    let text = list_marker.replace_all(&text, "");
    let text = link.replace_all(&text, "$1");
    let text = blank_runs.replace_all(&text, "\n\n");
    text.trim().to_string()
}

// 在 . ! ? 后跟空白处断句，标点保留在句尾
fn split_sentences(para: &str) -> Vec<&str> {
    let boundary = Regex::new(r"[.!?]\s+").unwrap();
    let mut out = Vec::new();
    let mut last = 0usize;
    for m in boundary.find_iter(para) {
        // 标点均为单字节 ASCII，start + 1 不会落在字符中间
        let end = m.start() + 1;
        out.push(&para[last..end]);
        last = m.end();
    }
    if last < para.len() {
        out.push(&para[last..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullet_lines(block: &str) -> Vec<&str> {
        block.lines().collect()
    }

    #[test]
    fn code_fence_contents_never_appear() {
        let text = "Walk in peace every single day of your life.\n\n```\nsecret_token = 42\n```\n\nHis mercy is new every morning without fail.";
        let out = markdown_to_bullets(text);
        assert!(!out.contains("secret_token"));
        assert!(out.contains("Walk in peace"));
        assert!(out.contains("mercy is new"));
    }

    #[test]
    fn headings_list_markers_and_links_are_stripped() {
        let text = "# Peace\n\n- Be still and know that He is God almighty.\n\nRead [the psalm](https://example.org/ps46) slowly and breathe deeply.";
        let out = markdown_to_bullets(text);
        assert!(!out.contains('#'));
        assert!(!out.contains("- Be still"));
        assert!(out.contains("Be still and know"));
        assert!(out.contains("the psalm"));
        assert!(!out.contains("example.org"));
    }

    #[test]
    fn image_markup_is_removed() {
        let text = "![dove](img/dove.png)\nLet not your heart be troubled, neither afraid.";
        let out = markdown_to_bullets(text);
        assert!(!out.contains("dove"));
        assert!(out.contains("heart be troubled"));
    }

    #[test]
    fn every_bullet_is_prefixed_and_capped_at_ten() {
        let paras: Vec<String> = (0..12)
            .map(|i| format!("Paragraph number {} carries more than twenty characters.", i))
            .collect();
        let out = markdown_to_bullets(&paras.join("\n\n"));
        let lines = bullet_lines(&out);
        assert_eq!(lines.len(), MAX_BULLETS);
        assert!(lines.iter().all(|l| l.starts_with("• ")));
    }

    #[test]
    fn at_most_two_bullets_per_paragraph() {
        let text = "First sentence runs well past twenty characters. \
                    Second sentence also runs past twenty characters. \
                    Third sentence would overflow the paragraph budget.";
        let out = markdown_to_bullets(text);
        assert_eq!(bullet_lines(&out).len(), 2);
        assert!(!out.contains("Third sentence"));
    }

    #[test]
    fn short_paragraph_falls_back_to_its_text() {
        let out = markdown_to_bullets("Short line.");
        assert_eq!(out, "• Short line.");
    }

    #[test]
    fn sentence_free_paragraph_falls_back_to_first_200_chars() {
        // 每句都短于阈值，段落整体超过 200 字符
        let para = "Amen. ".repeat(50);
        let out = markdown_to_bullets(para.trim());
        let lines = bullet_lines(&out);
        assert_eq!(lines.len(), 1);
        let body = lines[0].trim_start_matches("• ");
        assert_eq!(body.chars().count(), 200);
    }

    #[test]
    fn internal_whitespace_is_collapsed() {
        let text = "Grace   and\tpeace be multiplied unto you abundantly.";
        let out = markdown_to_bullets(text);
        assert_eq!(out, "• Grace and peace be multiplied unto you abundantly.");
    }

    #[test]
    fn empty_input_yields_empty_block() {
        assert_eq!(markdown_to_bullets(""), "");
        assert_eq!(markdown_to_bullets("```\nonly code\n```"), "");
    }

    #[test]
    fn idempotent_on_clean_sentence_per_line_output() {
        let text = "The Lord is my shepherd and I shall not want.\n\nHe leads me beside the still waters of rest.";
        let first = markdown_to_bullets(text);
        let stripped: String = first
            .lines()
            .map(|l| l.trim_start_matches("• "))
            .collect::<Vec<_>>()
            .join("\n");
        let second = markdown_to_bullets(&stripped);
        assert_eq!(first, second);
    }
}
