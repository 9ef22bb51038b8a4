//! Sampling documentation admin pages.
//!
//! Embedded under a sampling activity, with an extra page for uploading
//! several documents at once.

use crate::domain::sampling::{SamplingDocumentation, DEFAULT_MEDIA_CONTEXT, FILE_PROVIDER};

use super::{AdminDescriptor, FieldSpec, Widget, CREATE_MULTIPLE};

const SHOW_FILE_TEMPLATE: &str = "admin/sampling_documentation/show_file.html";

pub fn descriptor() -> AdminDescriptor {
    AdminDescriptor::for_record::<SamplingDocumentation>("sampling-documentation")
        .parent_association("samplingActivity")
        .extra_route(CREATE_MULTIPLE)
        .list(vec![
            FieldSpec::new("id").widget(Widget::Identifier),
            FieldSpec::new("samplingActivity"),
            FieldSpec::new("samplingDocumentType"),
            FieldSpec::new("document"),
            FieldSpec::actions(&["show", "edit"]),
        ])
        .filters(vec![
            FieldSpec::new("samplingActivity"),
            FieldSpec::new("samplingDocumentType"),
            FieldSpec::new("document"),
        ])
        .form(vec![
            FieldSpec::new("samplingActivity").widget(Widget::ModelList),
            FieldSpec::new("samplingDocumentType").widget(Widget::ModelList),
            FieldSpec::new("document").widget(Widget::Media {
                provider: FILE_PROVIDER,
                context: DEFAULT_MEDIA_CONTEXT,
            }),
        ])
        .show(vec![
            FieldSpec::new("samplingActivity"),
            FieldSpec::new("samplingDocumentType"),
            FieldSpec::new("document"),
            FieldSpec::new("file").widget(Widget::Template {
                path: SHOW_FILE_TEMPLATE,
            }),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::AdminAction;

    #[test]
    fn embedded_form_omits_sampling_activity() {
        let descriptor = descriptor();
        let standalone: Vec<_> = descriptor.form_fields(false).iter().map(|f| f.name).collect();
        let embedded: Vec<_> = descriptor.form_fields(true).iter().map(|f| f.name).collect();
        assert_eq!(
            standalone,
            vec!["samplingActivity", "samplingDocumentType", "document"]
        );
        assert_eq!(embedded, vec!["samplingDocumentType", "document"]);
    }

    #[test]
    fn create_pages_have_no_buttons() {
        let descriptor = descriptor();
        assert!(descriptor.action_buttons(AdminAction::Create).is_empty());
        assert!(descriptor
            .action_buttons(AdminAction::CreateMultiple)
            .is_empty());
    }

    #[test]
    fn other_pages_offer_create_multiple() {
        let descriptor = descriptor();
        for action in [
            AdminAction::Tree,
            AdminAction::Show,
            AdminAction::Edit,
            AdminAction::Delete,
            AdminAction::List,
            AdminAction::Batch,
        ] {
            assert!(
                descriptor.action_buttons(action).contains(&CREATE_MULTIPLE),
                "missing on {}",
                action
            );
        }
    }

    #[test]
    fn dashboard_offers_add_many() {
        let actions = descriptor().dashboard_actions();
        let add_many = actions.iter().find(|a| a.name == CREATE_MULTIPLE).unwrap();
        assert_eq!(add_many.label, "Add many");
        assert_eq!(add_many.icon, "files-o");
        assert_eq!(add_many.url, "/admin/sampling-documentation/create_multiple");
    }

    #[test]
    fn show_includes_file_template() {
        let descriptor = descriptor();
        let file = descriptor.show.last().unwrap();
        assert_eq!(file.name, "file");
        assert!(file.is_synthetic());
    }
}
