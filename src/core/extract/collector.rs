//! AST visitor collecting react-intl message descriptors.
//!
//! Recognized call sites:
//!
//! ```typescript
//! defineMessages({ greeting: { id: "app.greeting", defaultMessage: "Hi" } });
//! defineMessage({ id: "app.title", defaultMessage: "Title" });
//! intl.formatMessage({ id: "app.bye", defaultMessage: "Bye" });
//! <FormattedMessage id="app.welcome" defaultMessage="Welcome" />
//! ```
//!
//! Additional function and component names can be configured; they are
//! treated like `formatMessage` and `FormattedMessage` respectively.

use std::sync::Arc;

use swc_common::{SourceMap, Span};
use swc_ecma_ast::{
    BinaryOp, CallExpr, Callee, Expr, JSXAttrName, JSXAttrOrSpread, JSXAttrValue, JSXElementName,
    JSXExpr, JSXOpeningElement, Lit, MemberProp, ObjectLit, Prop, PropName, PropOrSpread,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::data::{Description, ExtractedMessage};

pub const DEFINE_MESSAGES: &str = "defineMessages";
pub const DEFAULT_FUNCTION_NAMES: &[&str] = &["defineMessage", "formatMessage"];
pub const DEFAULT_COMPONENT_NAMES: &[&str] = &["FormattedMessage"];

/// Options controlling which call sites are recognized.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Functions taking a single descriptor as first argument.
    pub function_names: Vec<String>,
    /// Components taking descriptor fields as attributes.
    pub component_names: Vec<String>,
    pub preserve_whitespace: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            function_names: DEFAULT_FUNCTION_NAMES.iter().map(|s| s.to_string()).collect(),
            component_names: DEFAULT_COMPONENT_NAMES.iter().map(|s| s.to_string()).collect(),
            preserve_whitespace: false,
        }
    }
}

impl ExtractOptions {
    pub fn with_additional(
        mut self,
        function_names: &[String],
        component_names: &[String],
    ) -> Self {
        for name in function_names {
            if !self.function_names.contains(name) {
                self.function_names.push(name.clone());
            }
        }
        for name in component_names {
            if !self.component_names.contains(name) {
                self.component_names.push(name.clone());
            }
        }
        self
    }

    pub fn with_preserve_whitespace(mut self, preserve_whitespace: bool) -> Self {
        self.preserve_whitespace = preserve_whitespace;
        self
    }
}

/// Descriptor fields before position information is attached.
#[derive(Debug, Default)]
struct DescriptorFields {
    id: Option<String>,
    default_message: Option<String>,
    description: Option<Description>,
}

impl DescriptorFields {
    fn set(&mut self, key: &str, value: Option<Description>) {
        match key {
            "id" => self.id = value.and_then(Description::into_text),
            "defaultMessage" => self.default_message = value.and_then(Description::into_text),
            "description" => self.description = value,
            _ => {}
        }
    }

    fn is_message(&self) -> bool {
        self.id.is_some() || self.default_message.is_some()
    }
}

pub struct MessageCollector<'a> {
    source_map: Arc<SourceMap>,
    options: &'a ExtractOptions,
    pub messages: Vec<ExtractedMessage>,
}

impl<'a> MessageCollector<'a> {
    pub fn new(source_map: Arc<SourceMap>, options: &'a ExtractOptions) -> Self {
        Self {
            source_map,
            options,
            messages: Vec::new(),
        }
    }

    fn push(&mut self, fields: DescriptorFields, span: Span) {
        if !fields.is_message() {
            return;
        }
        let loc = self.source_map.lookup_char_pos(span.lo);
        let default_message = if self.options.preserve_whitespace {
            fields.default_message
        } else {
            fields.default_message.map(|m| normalize_whitespace(&m))
        };

        self.messages.push(ExtractedMessage {
            id: fields.id,
            default_message,
            description: fields.description,
            line: loc.line,
            col: loc.col_display + 1,
        });
    }

    fn collect_descriptor(&mut self, obj: &ObjectLit) {
        let mut fields = DescriptorFields::default();
        for prop in &obj.props {
            if let PropOrSpread::Prop(prop) = prop
                && let Prop::KeyValue(kv) = &**prop
                && let Some(key) = prop_name(&kv.key)
            {
                fields.set(&key, field_value(&kv.value));
            }
        }
        self.push(fields, obj.span);
    }

    fn collect_define_messages(&mut self, obj: &ObjectLit) {
        for prop in &obj.props {
            if let PropOrSpread::Prop(prop) = prop
                && let Prop::KeyValue(kv) = &**prop
                && let Expr::Object(descriptor) = unwrap_ts_expr(&kv.value)
            {
                self.collect_descriptor(descriptor);
            }
        }
    }

    fn callee_name(callee: &Callee) -> Option<&str> {
        let Callee::Expr(expr) = callee else {
            return None;
        };
        match &**expr {
            Expr::Ident(ident) => Some(ident.sym.as_str()),
            Expr::Member(member) => match &member.prop {
                MemberProp::Ident(prop) => Some(prop.sym.as_str()),
                _ => None,
            },
            _ => None,
        }
    }

    fn element_name(name: &JSXElementName) -> Option<&str> {
        match name {
            JSXElementName::Ident(ident) => Some(ident.sym.as_str()),
            JSXElementName::JSXMemberExpr(member) => Some(member.prop.sym.as_str()),
            JSXElementName::JSXNamespacedName(_) => None,
        }
    }
}

impl Visit for MessageCollector<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some(name) = Self::callee_name(&node.callee)
            && let Some(arg) = node.args.first()
            && arg.spread.is_none()
            && let Expr::Object(obj) = unwrap_ts_expr(&arg.expr)
        {
            if name == DEFINE_MESSAGES {
                self.collect_define_messages(obj);
            } else if self.options.function_names.iter().any(|f| f == name) {
                self.collect_descriptor(obj);
            }
        }

        node.visit_children_with(self);
    }

    fn visit_jsx_opening_element(&mut self, node: &JSXOpeningElement) {
        if let Some(name) = Self::element_name(&node.name)
            && self.options.component_names.iter().any(|c| c == name)
        {
            let mut fields = DescriptorFields::default();
            for attr in &node.attrs {
                if let JSXAttrOrSpread::JSXAttr(attr) = attr
                    && let JSXAttrName::Ident(attr_name) = &attr.name
                {
                    let key = attr_name.sym.as_str();
                    let value = match &attr.value {
                        Some(JSXAttrValue::Str(s)) => s.value.as_str().map(Description::from),
                        Some(JSXAttrValue::JSXExprContainer(container)) => {
                            match &container.expr {
                                JSXExpr::Expr(expr) => field_value(expr),
                                JSXExpr::JSXEmptyExpr(_) => None,
                            }
                        }
                        _ => None,
                    };
                    fields.set(key, value);
                }
            }
            self.push(fields, node.span);
        }

        node.visit_children_with(self);
    }
}

fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|s| s.to_string()),
        _ => None,
    }
}

fn unwrap_ts_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::TsAs(ts_as) => unwrap_ts_expr(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_ts_expr(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_ts_expr(&ts_sat.expr),
        Expr::Paren(paren) => unwrap_ts_expr(&paren.expr),
        _ => expr,
    }
}

/// Evaluate a statically known string: literals, expression-free templates
/// and `+` concatenations of those.
fn static_string(expr: &Expr) -> Option<String> {
    match unwrap_ts_expr(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str().map(|s| s.to_string())),
        Expr::Bin(bin) if bin.op == BinaryOp::Add => {
            let left = static_string(&bin.left)?;
            let right = static_string(&bin.right)?;
            Some(left + right.as_str())
        }
        _ => None,
    }
}

/// Descriptor values are static strings; descriptions may also be object
/// literals carrying extra context for translators.
fn field_value(expr: &Expr) -> Option<Description> {
    match unwrap_ts_expr(expr) {
        obj @ Expr::Object(_) => static_json(obj).map(Description::Structured),
        other => static_string(other).map(Description::Text),
    }
}

fn static_json(expr: &Expr) -> Option<serde_json::Value> {
    use serde_json::Value;

    match unwrap_ts_expr(expr) {
        Expr::Lit(Lit::Num(n)) if n.value.fract() == 0.0 && n.value.abs() < i64::MAX as f64 => {
            Some(Value::from(n.value as i64))
        }
        Expr::Lit(Lit::Num(n)) => serde_json::Number::from_f64(n.value).map(Value::Number),
        Expr::Lit(Lit::Bool(b)) => Some(Value::Bool(b.value)),
        Expr::Lit(Lit::Null(_)) => Some(Value::Null),
        Expr::Object(obj) => {
            let mut map = serde_json::Map::new();
            for prop in &obj.props {
                let PropOrSpread::Prop(prop) = prop else {
                    return None;
                };
                let Prop::KeyValue(kv) = &**prop else {
                    return None;
                };
                map.insert(prop_name(&kv.key)?, static_json(&kv.value)?);
            }
            Some(Value::Object(map))
        }
        Expr::Array(arr) => arr
            .elems
            .iter()
            .map(|elem| match elem {
                Some(elem) if elem.spread.is_none() => static_json(&elem.expr),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        other => static_string(other).map(Value::String),
    }
}

/// Collapse whitespace runs to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
