use crate::{DomainError, SourceId, StorageUri};

/// Directory under the storage scheme that holds every derived preview.
pub const PREVIEW_NAMESPACE: &str = "pdfpreview";

const PREVIEW_EXTENSION: &str = "jpg";

/// Replace anything outside `[A-Za-z0-9._-]` with `_`.
///
/// Expects an already transliterated name; any non-ASCII leftovers are
/// replaced as well.
pub fn sanitize_file_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn preview_file_name(id: SourceId, base_name: &str) -> Result<String, DomainError> {
    let sanitized = sanitize_file_name(base_name);
    if sanitized.is_empty() {
        return Err(DomainError::EmptyFileName);
    }
    Ok(format!("{}-{sanitized}.{PREVIEW_EXTENSION}", id.get()))
}

/// `{scheme}://pdfpreview/{id}-{name}.jpg`
///
/// The id prefix keeps two sources with the same name apart.
pub fn destination_uri(
    scheme: &str,
    id: SourceId,
    base_name: &str,
) -> Result<StorageUri, DomainError> {
    let file_name = preview_file_name(id, base_name)?;
    StorageUri::new(scheme, &format!("{PREVIEW_NAMESPACE}/{file_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: i64) -> SourceId {
        SourceId::new(value).expect("id")
    }

    #[test]
    fn destination_embeds_id_and_name() {
        let uri = destination_uri("public", id(42), "Report").expect("uri");
        assert_eq!(uri.to_string(), "public://pdfpreview/42-Report.jpg");
    }

    #[test]
    fn destination_is_stable_across_calls() {
        let first = destination_uri("public", id(7), "Quarterly plan").expect("uri");
        let second = destination_uri("public", id(7), "Quarterly plan").expect("uri");
        assert_eq!(first, second);
        assert_eq!(first.basename(), "7-Quarterly_plan.jpg");
    }

    #[test]
    fn same_name_different_ids_never_collide() {
        let a = destination_uri("public", id(1), "Report").expect("uri");
        let b = destination_uri("public", id(11), "Report").expect("uri");
        assert_ne!(a, b);
    }

    #[test]
    fn sanitize_replaces_path_and_shell_characters() {
        assert_eq!(sanitize_file_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_file_name("a;b|c$(d)"), "a_b_c__d_");
        assert_eq!(sanitize_file_name("Übersicht"), "_bersicht");
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(
            preview_file_name(id(3), "   "),
            Err(DomainError::EmptyFileName)
        ));
    }
}
