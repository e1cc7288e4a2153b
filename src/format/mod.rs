//! 文本格式化模块
//!
//! 将回答文本转换为 HTML 片段。不是完整的 Markdown 解析器，只按固定顺序
//! 应用五条替换规则：
//!
//! 1. 双换行转为段落分隔，其余单换行转为 `<br>`
//! 2. 整体包裹在一个 `<p>` 中
//! 3. `**...**` 与 `__...__` 转为 `<strong>`
//! 4. `*...*` 与 `_..._` 转为 `<em>`
//! 5. `http(s)://` 开头的非空白串转为新窗口打开的链接
//!
//! 规则顺序决定了重叠定界符的结果：加粗在外、斜体在内。
//! 默认模式不做 HTML 转义，回答中的标签会原样注入页面。
//!
//! 定界符之间的内容不跨越行终止符（`\n`、`\r`、U+2028、U+2029）。

use minijinja::HtmlEscape;
use once_cell::sync::Lazy;
use regex::Regex;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("formatter pattern is valid")
}

static BOLD_STARS: Lazy<Regex> =
    Lazy::new(|| pattern(r"\*\*([^\n\r\u{2028}\u{2029}]*?)\*\*"));
static BOLD_UNDERSCORES: Lazy<Regex> =
    Lazy::new(|| pattern(r"__([^\n\r\u{2028}\u{2029}]*?)__"));
static ITALIC_STAR: Lazy<Regex> = Lazy::new(|| pattern(r"\*([^\n\r\u{2028}\u{2029}]*?)\*"));
static ITALIC_UNDERSCORE: Lazy<Regex> =
    Lazy::new(|| pattern(r"_([^\n\r\u{2028}\u{2029}]*?)_"));
static URL: Lazy<Regex> = Lazy::new(|| pattern(r"(https?://[^\s]+)"));
// 转义后的斜杠可能是 `&#x2f;`
static URL_HARDENED: Lazy<Regex> =
    Lazy::new(|| pattern(r"(https?:(?://|&#x2f;&#x2f;)[^\s<]+)"));

const STRONG: &str = "<strong>${1}</strong>";
const EM: &str = "<em>${1}</em>";
const LINK: &str = r#"<a href="${1}" target="_blank">${1}</a>"#;

/// 回答文本格式化器
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextFormatter {
    hardened: bool,
}

impl TextFormatter {
    /// 不转义的默认格式化器
    pub fn new() -> Self {
        Self { hardened: false }
    }

    /// 先转义 HTML，链接在 `<` 处截止
    pub fn hardened() -> Self {
        Self { hardened: true }
    }

    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    pub fn format(&self, text: &str) -> String {
        let source = if self.hardened {
            HtmlEscape(text).to_string()
        } else {
            text.to_string()
        };

        let broken = source.replace("\n\n", "</p><p>").replace('\n', "<br>");
        let wrapped = format!("<p>{}</p>", broken);

        let bold = BOLD_STARS.replace_all(&wrapped, STRONG);
        let bold = BOLD_UNDERSCORES.replace_all(&bold, STRONG);

        let italic = ITALIC_STAR.replace_all(&bold, EM);
        let italic = ITALIC_UNDERSCORE.replace_all(&italic, EM);

        let url = if self.hardened { &*URL_HARDENED } else { &*URL };
        url.replace_all(&italic, LINK).into_owned()
    }
}

/// 使用默认格式化器
pub fn format_text(text: &str) -> String {
    TextFormatter::new().format(text)
}
