//! Element → view builder
//!
//! Walks an element tree and produces the rendered [`View`] tree, dispatching
//! on the element tag. For every element the `modifiers` attribute is decoded
//! before the element's own view is constructed, so a malformed modifier never
//! leaves a half-built view behind.
//!
//! Failures follow the context's [`ErrorPolicy`]: fail-fast returns the error
//! to the caller, degrade-subtree swaps the failing subtree for an error
//! placeholder and carries on with its siblings.

use lvn_core::{attrs, Element, ErrorPolicy, LiveContext, RenderResult, Value};
use lvn_layout::{ModifierStack, View, ViewKind};
use tracing::warn;

use crate::form::FormSet;
use crate::list::LiveList;

/// Tags with dedicated components
pub mod tags {
    pub const LIST: &str = "list";
    pub const FORM: &str = "form";
    pub const TEXT: &str = "text";
}

/// Builds views for one render pass
pub struct ViewBuilder<'a> {
    forms: &'a mut FormSet,
}

impl<'a> ViewBuilder<'a> {
    /// Forms reached during the build stage their lifecycle work in `forms`
    pub fn new(forms: &'a mut FormSet) -> Self {
        Self { forms }
    }

    /// Build the view for `element` and its subtree
    pub fn build(&mut self, element: &Element, ctx: &LiveContext) -> RenderResult<View> {
        match self.build_element(element, ctx) {
            Ok(view) => Ok(view),
            Err(err) => match ctx.error_policy() {
                ErrorPolicy::FailFast => Err(err),
                ErrorPolicy::DegradeSubtree => {
                    warn!("degrading <{}> subtree: {}", element.tag(), err);
                    Ok(View::error(err.to_string()))
                }
            },
        }
    }

    fn build_element(&mut self, element: &Element, ctx: &LiveContext) -> RenderResult<View> {
        let modifiers = ModifierStack::decode_attribute(element)?;

        let view = match element.tag() {
            tags::LIST => self.build_list(element, ctx)?,
            tags::FORM => self.build_form(element, ctx)?,
            tags::TEXT => View::text(element.text()),
            _ if ctx.form_model().is_some() && element.has_attr(attrs::NAME) => {
                self.build_field(element, ctx)?
            }
            tag => View::container(tag).with_children(self.build_children(element, ctx)?),
        };

        Ok(modifiers.apply(view))
    }

    fn build_children(&mut self, element: &Element, ctx: &LiveContext) -> RenderResult<Vec<View>> {
        element
            .children()
            .iter()
            .map(|child| self.build(child, ctx))
            .collect()
    }

    fn build_list(&mut self, element: &Element, ctx: &LiveContext) -> RenderResult<View> {
        let list = LiveList::new(element)?;
        let rows = self.build_children(element, ctx)?;
        Ok(list.render(rows, ctx))
    }

    fn build_form(&mut self, element: &Element, ctx: &LiveContext) -> RenderResult<View> {
        let model = self.forms.visit(element, ctx)?;
        let id = model.borrow().id().to_string();

        let children = self.build_children(element, &ctx.with_form_model(model))?;
        Ok(View::new(ViewKind::Form { id }).with_children(children))
    }

    /// A named input inside a form shows the model's value
    fn build_field(&mut self, element: &Element, ctx: &LiveContext) -> RenderResult<View> {
        let name = element.attr_if_present(attrs::NAME).unwrap_or_default().to_string();
        let value = ctx
            .form_model()
            .and_then(|model| model.borrow().value(&name).cloned())
            .or_else(|| element.attribute(attrs::VALUE).cloned())
            .unwrap_or_else(|| Value::String(String::new()));

        let children = self.build_children(element, ctx)?;
        Ok(View::new(ViewKind::Field { name, value }).with_children(children))
    }
}

/// Build a one-off view tree with its own form set
pub fn build(element: &Element, ctx: &LiveContext) -> RenderResult<View> {
    let mut forms = FormSet::new();
    forms.begin_pass();
    let view = ViewBuilder::new(&mut forms).build(element, ctx)?;
    forms.end_pass(ctx, false);
    Ok(view)
}
