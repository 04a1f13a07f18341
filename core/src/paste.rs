use crate::{CommandEngine, Editor, EditorCommand, HtmlTransform};

/// Clipboard payload for a paste event: the richer HTML flavor when the
/// source offers one, and the plain-text fallback.
#[derive(Debug, Clone, Default)]
pub struct ClipboardData {
    pub html: Option<String>,
    pub text: String,
}

/// Paste sanitization. Returns true when the caller should let the native
/// default behavior proceed instead (formatting allowed, no custom
/// deserialization). Otherwise the content is inserted through the command
/// funnel: HTML runs through the deserialization hook first, plain text
/// goes in as-is.
pub fn handle_paste<E: CommandEngine>(
    editor: &mut Editor<E>,
    clipboard: &ClipboardData,
    allowed_formatting: bool,
    deserialization: Option<&dyn HtmlTransform>,
) -> bool {
    if allowed_formatting && deserialization.is_none() {
        return true;
    }
    let html = clipboard.html.as_deref().unwrap_or("");
    if !html.is_empty() && (allowed_formatting || deserialization.is_some()) {
        let processed = match deserialization {
            Some(hook) => hook.apply(html),
            None => html.to_string(),
        };
        editor.exec(EditorCommand::InsertHtml, Some(&processed));
    } else {
        editor.exec(EditorCommand::InsertText, Some(&clipboard.text));
    }
    false
}
