use crate::{
    CommandEngine, Editor, EditorCommand, FileBrowserOptions, ImageBrowserOptions,
};
use pan_dom::Node;
use serde::{Deserialize, Serialize};

/// Blocking interactive dialog used as the last-resort URL source. `None`
/// means the user cancelled.
pub trait PromptSource {
    fn prompt(&self, message: &str, initial: &str) -> Option<String>;
}

impl<F> PromptSource for F
where
    F: Fn(&str, &str) -> Option<String>,
{
    fn prompt(&self, message: &str, initial: &str) -> Option<String> {
        self(message, initial)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkTarget {
    #[serde(rename = "_self")]
    SameWindow,
    #[serde(rename = "_blank")]
    NewWindow,
}

#[derive(Debug, Clone, Default)]
pub struct LinkOptions {
    pub url: String,
    pub text: Option<String>,
    pub target: Option<LinkTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageOptions {
    pub width: Option<u32>,
    pub alt: Option<String>,
}

impl ImageOptions {
    fn is_plain(&self) -> bool {
        self.width.is_none() && self.alt.is_none()
    }
}

#[derive(Default)]
pub struct RouterOptions {
    pub prompt: Option<Box<dyn PromptSource>>,
    pub file_browser: Option<FileBrowserOptions>,
    pub image_browser: Option<ImageBrowserOptions>,
    pub on_file_select: Option<Box<dyn Fn(&str)>>,
    pub on_image_select: Option<Box<dyn Fn(&str)>>,
    pub on_request_link: Option<Box<dyn Fn(&str)>>,
    pub on_request_image_url: Option<Box<dyn Fn(&str)>>,
}

/// Translates high-level editor commands into primitive invocations, with
/// interactive fallback and pluggable external pickers. Remembers the last
/// applied link and image URLs to pre-fill subsequent prompts.
pub struct CommandRouter {
    options: RouterOptions,
    last_link: String,
    last_image: String,
}

impl CommandRouter {
    pub fn new(options: RouterOptions) -> Self {
        Self {
            options,
            last_link: String::new(),
            last_image: String::new(),
        }
    }

    pub fn last_link(&self) -> &str {
        &self.last_link
    }

    pub fn last_image(&self) -> &str {
        &self.last_image
    }

    pub fn run<E: CommandEngine>(
        &mut self,
        editor: &mut Editor<E>,
        command: EditorCommand,
        value: Option<&str>,
    ) {
        tracing::debug!(command = command.name(), "routing command");
        match command {
            EditorCommand::CreateLink => self.run_create_link(editor, value),
            EditorCommand::InsertImage => {
                self.run_insert_image(editor, value, &ImageOptions::default())
            }
            EditorCommand::ClearFormatting => {
                editor.exec(EditorCommand::RemoveFormat, None);
                editor.exec(EditorCommand::Unlink, None);
            }
            EditorCommand::Undo => {
                editor.undo();
            }
            EditorCommand::Redo => {
                editor.redo();
            }
            other => {
                editor.exec(other, value);
            }
        }
    }

    fn run_create_link<E: CommandEngine>(&mut self, editor: &mut Editor<E>, value: Option<&str>) {
        if let Some(url) = value {
            self.apply_link(
                editor,
                LinkOptions {
                    url: url.to_string(),
                    ..Default::default()
                },
            );
            return;
        }
        if let Some(request) = &self.options.on_request_link {
            request(&self.last_link);
            return;
        }
        let Some(prompt) = &self.options.prompt else {
            return;
        };
        let seed = if self.last_link.is_empty() {
            "https://"
        } else {
            &self.last_link
        };
        let Some(url) = prompt.prompt("Enter URL", seed) else {
            return;
        };
        if url.trim().is_empty() {
            return;
        }
        self.apply_link(
            editor,
            LinkOptions {
                url,
                ..Default::default()
            },
        );
    }

    /// Apply a link directly: run the primitive, then fix up the anchor
    /// containing the selection start (text overwrite, target/rel). The
    /// anchor mutation is the one place content changes outside the
    /// primitive path.
    pub fn apply_link<E: CommandEngine>(&mut self, editor: &mut Editor<E>, options: LinkOptions) {
        let url = options.url.trim().to_string();
        if url.is_empty() {
            return;
        }
        self.last_link = url.clone();
        editor.exec(EditorCommand::CreateLink, Some(&url));

        if options.text.is_none() && options.target.is_none() {
            return;
        }
        let Some(anchor) = editor.region_mut().anchor_at_selection_mut() else {
            return;
        };
        if let Some(text) = &options.text {
            anchor.children = vec![Node::Text(text.clone())];
        }
        match options.target {
            Some(LinkTarget::NewWindow) => {
                anchor.set_attr("target", "_blank");
                anchor.set_attr("rel", "noopener noreferrer");
            }
            Some(LinkTarget::SameWindow) => {
                anchor.set_attr("target", "_self");
                anchor.remove_attr("rel");
            }
            None => {}
        }
        // the fixup bypassed the command funnel, re-derive the model
        editor.sync_from_dom();
    }

    /// Insert an image. Preference order: image picker, file picker, direct
    /// value, URL-request callback, interactive prompt.
    pub fn run_insert_image<E: CommandEngine>(
        &mut self,
        editor: &mut Editor<E>,
        value: Option<&str>,
        options: &ImageOptions,
    ) {
        if self.options.image_browser.is_some() && self.options.on_image_select.is_some() {
            return; // the image picker collaborator owns this interaction
        }
        if self.options.file_browser.is_some() && self.options.on_file_select.is_some() {
            return;
        }
        if let Some(url) = value {
            self.apply_image(editor, url, options);
            return;
        }
        if let Some(request) = &self.options.on_request_image_url {
            request(&self.last_image);
            return;
        }
        let Some(prompt) = &self.options.prompt else {
            return;
        };
        let seed = if self.last_image.is_empty() {
            "https://"
        } else {
            &self.last_image
        };
        let Some(url) = prompt.prompt("Image URL or base64 data", seed) else {
            return;
        };
        if url.trim().is_empty() {
            return;
        }
        self.apply_image(editor, &url, options);
    }

    pub fn apply_image<E: CommandEngine>(
        &mut self,
        editor: &mut Editor<E>,
        url: &str,
        options: &ImageOptions,
    ) {
        let src = url.trim();
        if src.is_empty() {
            return;
        }
        self.last_image = src.to_string();
        if options.is_plain() {
            editor.exec(EditorCommand::InsertImage, Some(src));
            return;
        }
        let mut markup = format!(
            "<img src=\"{}\"",
            html_escape::encode_double_quoted_attribute(src)
        );
        if let Some(width) = options.width {
            markup.push_str(&format!(" width=\"{width}\""));
        }
        if let Some(alt) = &options.alt {
            markup.push_str(&format!(
                " alt=\"{}\"",
                html_escape::encode_double_quoted_attribute(alt)
            ));
        }
        markup.push('>');
        editor.exec(EditorCommand::InsertHtml, Some(&markup));
    }
}
