//! 内存页面
//!
//! 按元素约定保存页面状态，并通过 minijinja 模板渲染为完整页面或结果卡片。
//! 模板开启 HTML 自动转义；回答区域经 `safe` 过滤器原样注入。

use minijinja::{AutoEscape, Environment};
use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::config::config::{AppConfig, ElementIds};
use crate::error::Result;
use crate::models::{DisplayMode, FormInput, Region, Visibility};
use crate::widget::toggle::KeyVisibility;
use crate::widget::view::View;

const HIDDEN: &str = "d-none";

const PAGE_TEMPLATE: &str = include_str!("templates/page.html");
const RESULTS_CARD_TEMPLATE: &str = include_str!("templates/results_card.html");

static TEMPLATES: OnceCell<Environment<'static>> = OnceCell::new();

/// 页面模板环境，首次使用时编译
pub fn templates() -> Result<&'static Environment<'static>> {
    TEMPLATES.get_or_try_init(|| -> Result<Environment<'static>> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template("results_card.html", RESULTS_CARD_TEMPLATE)?;
        env.add_template("page.html", PAGE_TEMPLATE)?;
        Ok(env)
    })
}

/// 来源列表中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum SourceItem {
    Link(String),
    Placeholder(String),
}

#[derive(Serialize)]
struct RegionClasses {
    results_card: String,
    loading_indicator: String,
    results_content: String,
    error_display: String,
}

#[derive(Serialize)]
struct KeyContext {
    input_type: &'static str,
    icon: &'static str,
    visible: bool,
}

#[derive(Serialize)]
struct TopKOption {
    value: String,
    selected: bool,
}

#[derive(Serialize)]
struct PageContext<'a> {
    ids: &'a ElementIds,
    classes: RegionClasses,
    query: &'a str,
    api_key: &'a str,
    key: KeyContext,
    top_k_options: Vec<TopKOption>,
    answer_html: &'a str,
    sources: &'a [SourceItem],
    error_text: &'a str,
    scroll_requested: bool,
}

#[derive(Debug, Clone)]
pub struct PageView {
    ids: ElementIds,
    top_k_options: Vec<u32>,
    default_top_k: u32,
    form: FormInput,
    key_visibility: KeyVisibility,
    visibility: Visibility,
    answer_html: String,
    sources: Vec<SourceItem>,
    error_text: String,
    scroll_requested: bool,
}

impl PageView {
    pub fn new(ids: ElementIds, top_k_options: Vec<u32>, default_top_k: u32) -> Self {
        Self {
            ids,
            top_k_options,
            default_top_k,
            form: FormInput::new("", default_top_k.to_string()),
            key_visibility: KeyVisibility::Masked,
            visibility: Visibility::default(),
            answer_html: String::new(),
            sources: Vec::new(),
            error_text: String::new(),
            scroll_requested: false,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.elements.clone(),
            config.form.top_k_options.clone(),
            config.form.default_top_k,
        )
    }

    /// 填入表单字段（模拟用户输入）
    pub fn fill(&mut self, form: FormInput) {
        self.form = form;
    }

    pub fn with_form(mut self, form: FormInput) -> Self {
        self.fill(form);
        self
    }

    pub fn with_key_visibility(mut self, visibility: KeyVisibility) -> Self {
        self.key_visibility = visibility;
        self
    }

    pub fn ids(&self) -> &ElementIds {
        &self.ids
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn mode(&self) -> DisplayMode {
        self.visibility.mode()
    }

    pub fn answer_html(&self) -> &str {
        &self.answer_html
    }

    pub fn sources(&self) -> &[SourceItem] {
        &self.sources
    }

    pub fn error_text(&self) -> &str {
        &self.error_text
    }

    pub fn scroll_requested(&self) -> bool {
        self.scroll_requested
    }

    fn class(base: &str, visible: bool) -> String {
        match (base.is_empty(), visible) {
            (true, true) => String::new(),
            (true, false) => HIDDEN.to_string(),
            (false, true) => base.to_string(),
            (false, false) => format!("{} {}", base, HIDDEN),
        }
    }

    fn selected_top_k(&self) -> String {
        let current = self.form.top_k.trim();
        if current.is_empty() {
            self.default_top_k.to_string()
        } else {
            current.to_string()
        }
    }

    fn context(&self) -> PageContext<'_> {
        let flags = &self.visibility;
        let selected = self.selected_top_k();

        PageContext {
            ids: &self.ids,
            classes: RegionClasses {
                results_card: Self::class("card mt-4", flags.results_card),
                loading_indicator: Self::class("text-center my-4", flags.loading_indicator),
                results_content: Self::class("", flags.results_content),
                error_display: Self::class("alert alert-danger", flags.error_display),
            },
            query: &self.form.query,
            api_key: self.form.api_key.as_deref().unwrap_or_default(),
            key: KeyContext {
                input_type: self.key_visibility.input_type(),
                icon: self.key_visibility.icon(),
                visible: self.key_visibility.is_visible(),
            },
            top_k_options: self
                .top_k_options
                .iter()
                .map(|option| {
                    let value = option.to_string();
                    TopKOption {
                        selected: value == selected,
                        value,
                    }
                })
                .collect(),
            answer_html: &self.answer_html,
            sources: &self.sources,
            error_text: &self.error_text,
            scroll_requested: self.scroll_requested,
        }
    }

    fn render(&self, name: &str) -> Result<String> {
        let template = templates()?.get_template(name)?;
        Ok(template.render(self.context())?)
    }

    /// 结果卡片（加载指示器、回答与来源、错误信息）
    pub fn render_results_card(&self) -> Result<String> {
        self.render("results_card.html")
    }

    /// 完整页面
    ///
    /// 表单提交到 `/ask`，密钥切换按钮提交到 `/toggle-api-key`。
    pub fn render_page(&self) -> Result<String> {
        self.render("page.html")
    }
}

impl View for PageView {
    fn read_form(&self) -> FormInput {
        self.form.clone()
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        self.visibility.set(region, visible);
    }

    fn set_answer_html(&mut self, html: &str) {
        self.answer_html = html.to_string();
    }

    fn clear_sources(&mut self) {
        self.sources.clear();
    }

    fn append_source(&mut self, url: &str) -> Result<()> {
        self.sources.push(SourceItem::Link(url.to_string()));
        Ok(())
    }

    fn show_no_sources(&mut self, placeholder: &str) {
        self.sources = vec![SourceItem::Placeholder(placeholder.to_string())];
    }

    fn set_error_text(&mut self, message: &str) {
        self.error_text = message.to_string();
    }

    fn scroll_results_into_view(&mut self) {
        self.scroll_requested = true;
    }

    fn api_key_visibility(&self) -> KeyVisibility {
        self.key_visibility
    }

    fn set_api_key_visibility(&mut self, visibility: KeyVisibility) {
        self.key_visibility = visibility;
    }
}
