//! UI primitives: button and loading spinner

use crate::common::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn-primary",
            ButtonVariant::Secondary => "btn-secondary",
            ButtonVariant::Danger => "btn-danger",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Button<'a> {
    pub variant: ButtonVariant,
    pub disabled: bool,
    pub class: &'a str,
    pub aria_label: Option<&'a str>,
    pub title: Option<&'a str>,
}

impl<'a> Button<'a> {
    pub fn new(variant: ButtonVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn class(mut self, class: &'a str) -> Self {
        self.class = class;
        self
    }

    pub fn aria_label(mut self, label: &'a str) -> Self {
        self.aria_label = Some(label);
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Submit button with an escaped text label
    pub fn render(&self, label: &str) -> String {
        self.render_html(&escape_html(label))
    }

    /// Submit button around already-built markup
    pub fn render_html(&self, inner_html: &str) -> String {
        let mut classes = format!("btn {}", self.variant.class());
        if self.disabled {
            classes.push_str(" btn-disabled");
        }
        if !self.class.is_empty() {
            classes.push(' ');
            classes.push_str(self.class);
        }

        let mut attrs = String::new();
        if self.disabled {
            attrs.push_str(" disabled");
        }
        if let Some(label) = self.aria_label {
            attrs.push_str(&format!(r#" aria-label="{}""#, escape_html(label)));
        }
        if let Some(title) = self.title {
            attrs.push_str(&format!(r#" title="{}""#, escape_html(title)));
        }

        format!(
            r#"<button type="submit" class="{}"{}>{}</button>"#,
            escape_html(&classes),
            attrs,
            inner_html
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl LoadingSize {
    fn class(&self) -> &'static str {
        match self {
            LoadingSize::Small => "spinner-sm",
            LoadingSize::Medium => "spinner-md",
            LoadingSize::Large => "spinner-lg",
        }
    }
}

/// Spinning status indicator
pub fn loading(size: LoadingSize, class: &str) -> String {
    format!(
        r#"<div class="loading {}"><div class="spinner {}" role="status" aria-label="Loading"><span class="sr-only">Loading...</span></div></div>"#,
        escape_html(class),
        size.class()
    )
}
