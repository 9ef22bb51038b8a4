//! Expenditure admin pages.

use crate::domain::expenditure::Expenditure;
use crate::domain::foundation::Money;

use super::{AdminDescriptor, FieldSpec, Widget};

const ILRI_CODE_LABEL: &str = "ILRI code";

fn dollars() -> Widget {
    Widget::Currency { symbol: "$" }
}

fn whole_usd() -> Widget {
    Widget::Money {
        currency: Money::CURRENCY,
        grouping: true,
        scale: 0,
    }
}

pub fn descriptor() -> AdminDescriptor {
    AdminDescriptor::for_record::<Expenditure>("expenditure")
        .list(vec![
            FieldSpec::new("id").widget(Widget::Identifier),
            FieldSpec::new("ilriCode").label(ILRI_CODE_LABEL),
            FieldSpec::new("name"),
            FieldSpec::new("homeProgram"),
            FieldSpec::new("startDate"),
            FieldSpec::new("endDate"),
            FieldSpec::new("reportDate"),
            FieldSpec::new("totalBudget").widget(dollars()),
            FieldSpec::new("amount").widget(dollars()),
            FieldSpec::actions(&["show", "edit"]),
        ])
        .filters(vec![
            FieldSpec::new("ilriCode").label(ILRI_CODE_LABEL),
            FieldSpec::new("name"),
            FieldSpec::new("homeProgram"),
            FieldSpec::new("startDate").widget(Widget::DateRange),
            FieldSpec::new("endDate").widget(Widget::DateRange),
            FieldSpec::new("reportDate").widget(Widget::DateRange),
            FieldSpec::new("totalBudget"),
            FieldSpec::new("amount"),
        ])
        .form(vec![
            FieldSpec::new("ilriCode").label(ILRI_CODE_LABEL),
            FieldSpec::new("name"),
            FieldSpec::new("homeProgram"),
            FieldSpec::new("startDate").widget(Widget::DatePicker),
            FieldSpec::new("endDate")
                .widget(Widget::DatePicker)
                .optional(),
            FieldSpec::new("reportDate").widget(Widget::DateTimePicker),
            FieldSpec::new("totalBudget").widget(whole_usd()).optional(),
            FieldSpec::new("amount").widget(whole_usd()).optional(),
        ])
        .show(vec![
            FieldSpec::new("ilriCode").label(ILRI_CODE_LABEL),
            FieldSpec::new("name"),
            FieldSpec::new("homeProgram"),
            FieldSpec::new("startDate"),
            FieldSpec::new("endDate"),
            FieldSpec::new("reportDate"),
            FieldSpec::new("totalBudget").widget(dollars()),
            FieldSpec::new("amount").widget(dollars()),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::ACTIONS_FIELD;

    #[test]
    fn list_ends_with_show_and_edit_actions() {
        let descriptor = descriptor();
        let last = descriptor.list.last().unwrap();
        assert_eq!(last.name, ACTIONS_FIELD);
        assert_eq!(
            last.widget,
            Widget::Actions {
                actions: vec!["show", "edit"]
            }
        );
    }

    #[test]
    fn money_form_fields_are_optional_whole_dollars() {
        let descriptor = descriptor();
        for name in ["totalBudget", "amount"] {
            let field = descriptor.form.iter().find(|f| f.name == name).unwrap();
            assert!(!field.required);
            assert_eq!(field.widget, whole_usd());
        }
        let end = descriptor.form.iter().find(|f| f.name == "endDate").unwrap();
        assert!(!end.required);
    }

    #[test]
    fn show_mirrors_list_without_identifier_or_actions() {
        let descriptor = descriptor();
        let list: Vec<_> = descriptor.list[1..descriptor.list.len() - 1]
            .iter()
            .map(|f| f.name)
            .collect();
        let show: Vec<_> = descriptor.show.iter().map(|f| f.name).collect();
        assert_eq!(list, show);
    }
}
