//! Staff member admin pages.

use crate::domain::staff::StaffMember;

use super::{AdminDescriptor, FieldSpec, Widget};

pub fn descriptor() -> AdminDescriptor {
    AdminDescriptor::for_record::<StaffMember>("staff-member")
        .list(vec![
            FieldSpec::new("id").widget(Widget::Identifier),
            FieldSpec::new("username"),
            FieldSpec::new("email"),
            FieldSpec::new("firstName"),
            FieldSpec::new("lastName"),
            FieldSpec::new("homeProgram"),
            FieldSpec::actions(&["show", "edit"]),
        ])
        .filters(vec![
            FieldSpec::new("username"),
            FieldSpec::new("email"),
            FieldSpec::new("homeProgram"),
        ])
        .form(vec![
            FieldSpec::new("username"),
            FieldSpec::new("email"),
            FieldSpec::new("firstName").optional(),
            FieldSpec::new("lastName").optional(),
            FieldSpec::new("homeProgram"),
            FieldSpec::new("staffRoles").optional(),
        ])
        .show(vec![
            FieldSpec::new("username"),
            FieldSpec::new("email"),
            FieldSpec::new("firstName"),
            FieldSpec::new("lastName"),
            FieldSpec::new("homeProgram"),
            FieldSpec::new("projects").widget(Widget::ModelList),
            FieldSpec::new("staffRoles"),
        ])
}
