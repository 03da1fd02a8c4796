//! Declarative render tree.
//!
//! Views return a [`Node`] that fully replaces whatever the host mounted
//! before. Click and change handlers are [`Action`] values attached when an
//! element is built; the host hands them back to `CalendarPage::dispatch`.

use daybook_calendar::Event;

/// What a clickable or editable element does.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    EditEvent(Event),
    DeleteEvent(String),
    PreviousMonth,
    NextMonth,
    /// Carries the input's value; hosts replace it with what the user typed.
    SetYear(String),
    SubmitForm,
    CancelEdit,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::EditEvent(_) => "edit",
            Action::DeleteEvent(_) => "delete",
            Action::PreviousMonth => "prev-month",
            Action::NextMonth => "next-month",
            Action::SetYear(_) => "set-year",
            Action::SubmitForm => "submit",
            Action::CancelEdit => "cancel",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<&'static str>,
    pub attrs: Vec<(&'static str, String)>,
    pub on_click: Option<Action>,
    pub on_change: Option<Action>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            on_click: None,
            on_change: None,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn on_change(mut self, action: Action) -> Self {
        self.on_change = Some(action);
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    /// Elements carrying `class`, in document order.
    pub fn find_all(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(class, &mut found);
        found
    }

    fn collect<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if let Node::Element(e) = self {
            if e.has_class(class) {
                found.push(e);
            }
            for child in &e.children {
                child.collect(class, found);
            }
        }
    }

    /// Concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(e) => e.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Clickable actions in document order; the order `to_text` numbers them in.
    pub fn actions(&self) -> Vec<&Action> {
        let mut actions = Vec::new();
        self.collect_actions(&mut actions);
        actions
    }

    fn collect_actions<'a>(&'a self, actions: &mut Vec<&'a Action>) {
        if let Node::Element(e) = self {
            if let Some(action) = &e.on_click {
                if e.attr_value("disabled").is_none() {
                    actions.push(action);
                }
            }
            for child in &e.children {
                child.collect_actions(actions);
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape(t)),
            Node::Element(e) => {
                out.push('<');
                out.push_str(e.tag);
                if !e.classes.is_empty() {
                    out.push_str(" class=\"");
                    out.push_str(&e.classes.join(" "));
                    out.push('"');
                }
                for (name, value) in &e.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape(value));
                    out.push('"');
                }
                if let Some(action) = &e.on_click {
                    out.push_str(" data-action=\"");
                    out.push_str(action.name());
                    out.push('"');
                }
                if let Some(action) = &e.on_change {
                    out.push_str(" data-change=\"");
                    out.push_str(action.name());
                    out.push('"');
                }
                out.push('>');
                for child in &e.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(e.tag);
                out.push('>');
            }
        }
    }

    /// Terminal rendering. Enabled buttons are shown as `[n label]`, numbered
    /// from 1 in the same order as [`Node::actions`].
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let mut counter = 0;
        self.write_text(&mut out, &mut counter, 0);
        out
    }

    fn write_text(&self, out: &mut String, counter: &mut usize, depth: usize) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => {
                if e.has_class("empty-cell") {
                    return;
                }
                let block = matches!(e.tag, "div" | "li" | "h2" | "ul" | "form" | "label");
                if block {
                    if !out.is_empty() && !out.ends_with('\n') {
                        out.push('\n');
                    }
                    out.push_str(&"  ".repeat(depth));
                }
                if e.tag == "button" || e.tag == "input" {
                    write_control(e, out, counter);
                } else {
                    for child in &e.children {
                        child.write_text(out, counter, depth + usize::from(block));
                    }
                }
                if block && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }
}

fn write_control(e: &Element, out: &mut String, counter: &mut usize) {
    if e.tag == "input" {
        out.push_str(e.attr_value("name").unwrap_or(""));
        out.push_str(": ");
        out.push_str(e.attr_value("value").unwrap_or(""));
        out.push(' ');
        return;
    }
    let label: String = e.children.iter().map(Node::text_content).collect();
    let label = e
        .attr_value("title")
        .map(str::to_string)
        .unwrap_or(label);
    if e.on_click.is_some() && e.attr_value("disabled").is_none() {
        *counter += 1;
        out.push_str(&format!("[{} {}] ", counter, label));
    } else {
        out.push_str(&format!("({}) ", label));
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
