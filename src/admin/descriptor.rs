//! Presentation descriptor types.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::Record;

/// Name of the pseudo-field holding row actions in list views.
pub const ACTIONS_FIELD: &str = "_action";

/// Extra route for creating several records in one form.
pub const CREATE_MULTIPLE: &str = "create_multiple";

/// How a field is rendered or edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
    Plain,
    /// Rendered as the link to the record.
    Identifier,
    Currency {
        symbol: &'static str,
    },
    DateRange,
    DatePicker,
    DateTimePicker,
    Money {
        currency: &'static str,
        grouping: bool,
        scale: u8,
    },
    Media {
        provider: &'static str,
        context: &'static str,
    },
    /// Picker over the linked entity's list.
    ModelList,
    Actions {
        actions: Vec<&'static str>,
    },
    Template {
        path: &'static str,
    },
}

/// One field of a list, filter, form, or show view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub widget: Widget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub required: bool,
}

impl FieldSpec {
    /// A required plain field.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            widget: Widget::Plain,
            label: None,
            required: true,
        }
    }

    /// The row actions column.
    pub fn actions(actions: &[&'static str]) -> Self {
        Self::new(ACTIONS_FIELD).widget(Widget::Actions {
            actions: actions.to_vec(),
        })
    }

    pub fn widget(mut self, widget: Widget) -> Self {
        self.widget = widget;
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Whether the field is presentation-only and names no attribute.
    pub fn is_synthetic(&self) -> bool {
        self.name == ACTIONS_FIELD || matches!(self.widget, Widget::Template { .. })
    }
}

/// Admin page an action button is shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    Tree,
    List,
    Show,
    Edit,
    Delete,
    Batch,
    Create,
    CreateMultiple,
}

impl AdminAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminAction::Tree => "tree",
            AdminAction::List => "list",
            AdminAction::Show => "show",
            AdminAction::Edit => "edit",
            AdminAction::Delete => "delete",
            AdminAction::Batch => "batch",
            AdminAction::Create => "create",
            AdminAction::CreateMultiple => CREATE_MULTIPLE,
        }
    }

    /// Buttons every admin shows on this page.
    fn default_buttons(&self) -> &'static [&'static str] {
        match self {
            AdminAction::Tree => &["create", "list"],
            AdminAction::List => &["create"],
            AdminAction::Show => &["create", "edit", "list"],
            AdminAction::Edit => &["create", "show", "list"],
            AdminAction::Delete => &["show", "edit", "list"],
            AdminAction::Batch => &["list"],
            AdminAction::Create | AdminAction::CreateMultiple => &["list"],
        }
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AdminAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree" => Ok(AdminAction::Tree),
            "list" => Ok(AdminAction::List),
            "show" => Ok(AdminAction::Show),
            "edit" => Ok(AdminAction::Edit),
            "delete" => Ok(AdminAction::Delete),
            "batch" => Ok(AdminAction::Batch),
            "create" => Ok(AdminAction::Create),
            CREATE_MULTIPLE => Ok(AdminAction::CreateMultiple),
            other => Err(format!("unknown admin action: {}", other)),
        }
    }
}

/// Link shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardAction {
    pub name: &'static str,
    pub label: &'static str,
    pub url: String,
    pub icon: &'static str,
}

/// Everything needed to render the admin pages of one entity.
#[derive(Debug, Clone, Serialize)]
pub struct AdminDescriptor {
    pub entity: &'static str,
    pub slug: &'static str,
    pub list: Vec<FieldSpec>,
    pub filters: Vec<FieldSpec>,
    pub form: Vec<FieldSpec>,
    pub show: Vec<FieldSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_association: Option<&'static str>,
    pub extra_routes: Vec<&'static str>,
    #[serde(skip)]
    attributes: &'static [&'static str],
}

impl AdminDescriptor {
    /// An empty descriptor for `R`, addressed as `/admin/<slug>`.
    pub fn for_record<R: Record>(slug: &'static str) -> Self {
        Self {
            entity: R::ENTITY,
            slug,
            list: Vec::new(),
            filters: Vec::new(),
            form: Vec::new(),
            show: Vec::new(),
            parent_association: None,
            extra_routes: Vec::new(),
            attributes: R::ATTRIBUTES,
        }
    }

    pub fn list(mut self, fields: Vec<FieldSpec>) -> Self {
        self.list = fields;
        self
    }

    pub fn filters(mut self, fields: Vec<FieldSpec>) -> Self {
        self.filters = fields;
        self
    }

    pub fn form(mut self, fields: Vec<FieldSpec>) -> Self {
        self.form = fields;
        self
    }

    pub fn show(mut self, fields: Vec<FieldSpec>) -> Self {
        self.show = fields;
        self
    }

    pub fn parent_association(mut self, attribute: &'static str) -> Self {
        self.parent_association = Some(attribute);
        self
    }

    pub fn extra_route(mut self, route: &'static str) -> Self {
        self.extra_routes.push(route);
        self
    }

    fn has_route(&self, route: &str) -> bool {
        self.extra_routes.iter().any(|r| *r == route)
    }

    /// Form fields, leaving out the parent association when the form is
    /// embedded under a parent record.
    pub fn form_fields(&self, embedded: bool) -> Vec<&FieldSpec> {
        self.form
            .iter()
            .filter(|field| !(embedded && Some(field.name) == self.parent_association))
            .collect()
    }

    /// Buttons shown in the header of the given page.
    pub fn action_buttons(&self, action: AdminAction) -> Vec<&'static str> {
        if !self.has_route(CREATE_MULTIPLE) {
            return action.default_buttons().to_vec();
        }
        match action {
            AdminAction::Create | AdminAction::CreateMultiple => Vec::new(),
            _ => {
                let mut buttons = action.default_buttons().to_vec();
                buttons.push(CREATE_MULTIPLE);
                buttons
            }
        }
    }

    /// Dashboard links for this entity.
    pub fn dashboard_actions(&self) -> Vec<DashboardAction> {
        let mut actions = vec![
            DashboardAction {
                name: "list",
                label: "List",
                url: format!("/admin/{}/list", self.slug),
                icon: "list",
            },
            DashboardAction {
                name: "create",
                label: "Add new",
                url: format!("/admin/{}/create", self.slug),
                icon: "plus-circle",
            },
        ];
        if self.has_route(CREATE_MULTIPLE) {
            actions.push(DashboardAction {
                name: CREATE_MULTIPLE,
                label: "Add many",
                url: format!("/admin/{}/{}", self.slug, CREATE_MULTIPLE),
                icon: "files-o",
            });
        }
        actions
    }

    /// Field names that are neither synthetic nor attributes of the entity.
    pub fn unknown_fields(&self) -> Vec<&'static str> {
        self.list
            .iter()
            .chain(&self.filters)
            .chain(&self.form)
            .chain(&self.show)
            .filter(|field| !field.is_synthetic())
            .map(|field| field.name)
            .filter(|name| !self.attributes.contains(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference::Organisation;

    #[test]
    fn field_builder_sets_label_and_optional() {
        let field = FieldSpec::new("ilriCode").label("ILRI code").optional();
        assert_eq!(field.label, Some("ILRI code"));
        assert!(!field.required);
        assert_eq!(field.widget, Widget::Plain);
    }

    #[test]
    fn actions_and_templates_are_synthetic() {
        assert!(FieldSpec::actions(&["show"]).is_synthetic());
        assert!(FieldSpec::new("file")
            .widget(Widget::Template { path: "x.html" })
            .is_synthetic());
        assert!(!FieldSpec::new("name").is_synthetic());
    }

    #[test]
    fn admin_action_round_trips_through_str() {
        for action in [
            AdminAction::Tree,
            AdminAction::CreateMultiple,
            AdminAction::Batch,
        ] {
            assert_eq!(action.as_str().parse::<AdminAction>().unwrap(), action);
        }
        assert!("publish".parse::<AdminAction>().is_err());
    }

    #[test]
    fn plain_descriptor_uses_default_buttons() {
        let descriptor = AdminDescriptor::for_record::<Organisation>("organisation");
        assert_eq!(descriptor.action_buttons(AdminAction::Create), vec!["list"]);
        assert_eq!(descriptor.dashboard_actions().len(), 2);
    }

    #[test]
    fn unknown_fields_lists_names_outside_attributes() {
        let descriptor = AdminDescriptor::for_record::<Organisation>("organisation")
            .list(vec![FieldSpec::new("name"), FieldSpec::new("colour")]);
        assert_eq!(descriptor.unknown_fields(), vec!["colour"]);
    }

    #[test]
    fn widget_serializes_with_type_tag() {
        let json = serde_json::to_value(Widget::Money {
            currency: "USD",
            grouping: true,
            scale: 0,
        })
        .unwrap();
        assert_eq!(json["type"], "money");
        assert_eq!(json["currency"], "USD");
    }
}
