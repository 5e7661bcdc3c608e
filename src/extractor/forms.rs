use crate::logging::logger::PerfLogger;
use crate::logging::logging_defs::FORMS;
use crate::models::{Form, FormInput};
use crate::parser::{NodeExt, NodeRef};
use crate::utils::select_descendants;

pub fn extract_forms(forms: &[NodeRef], logger: &PerfLogger) -> Vec<Form> {
    start_span!(logger, FORMS);
    let extracted = forms.iter().map(extract_form).collect::<Vec<_>>();
    count_in_span!(logger, FORMS, "forms", extracted.len());
    end_span!(logger, FORMS);
    extracted
}

fn extract_form(form: &NodeRef) -> Form {
    let inputs = select_descendants(form, "input")
        .iter()
        .map(|input| FormInput {
            name: input.attr_value("name"),
            input_type: input
                .attr_value("type")
                .unwrap_or_else(|| String::from("text")),
        })
        .collect();

    Form {
        action: form.attr_value("action").unwrap_or_default(),
        method: form
            .attr_value("method")
            .map(|m| m.to_lowercase())
            .unwrap_or_else(|| String::from("get")),
        inputs,
    }
}
