use pan_core::{
    base_toolbar, CommandRouter, Editor, EditorCommand, EditorOptions, EditorEvent, EventTopic,
    KeyEvent, NativeEngine, RouterOptions, SelectionWatcher, ShortcutMap,
};
use pan_dom::{Caret, DomRange};
use std::io::{self, Write};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Line-oriented driver for the editing core. Type `:help` for commands;
/// any other line is inserted as text at the caret.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = EditorOptions {
        value: "<p>Hello world</p>".to_string(),
        ..Default::default()
    };
    let mut editor = Editor::new(NativeEngine::new(), options);
    editor.mount();

    let change_log = editor.events().on(EventTopic::Change, |event| {
        if let EditorEvent::Change { html } = event {
            tracing::info!(len = html.len(), "change");
        }
    });

    let mut router = CommandRouter::new(RouterOptions {
        prompt: Some(Box::new(stdin_prompt)),
        ..Default::default()
    });
    let mut watcher = SelectionWatcher::new(editor.events());
    let shortcuts = ShortcutMap::default();

    println!("pan-editor demo. :help for commands.");
    let stdin = io::stdin();
    let mut buf = String::new();
    loop {
        buf.clear();
        match stdin.read_line(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = buf.trim().to_string();
        if line.is_empty() {
            continue;
        }
        match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            [":quit"] => break,
            [":help"] => print_help(),
            [":show"] => println!("{}", editor.model_html()),
            [":state"] => {
                let state = watcher.state(&editor);
                match serde_json::to_string_pretty(state) {
                    Ok(json) => println!("{json}"),
                    Err(err) => eprintln!("state: {err}"),
                }
            }
            [":toolbar"] => match serde_json::to_string_pretty(&base_toolbar()) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("toolbar: {err}"),
            },
            [":select", path, from, to] => select(&mut editor, path, from, to),
            [":undo"] => {
                editor.undo();
                println!("{}", editor.model_html());
            }
            [":redo"] => {
                editor.redo();
                println!("{}", editor.model_html());
            }
            [":key", combo] => run_shortcut(&mut editor, &mut router, &shortcuts, combo),
            [":exec", name, rest @ ..] => {
                let value = if rest.is_empty() {
                    None
                } else {
                    Some(rest.join(" "))
                };
                match EditorCommand::from_str(name) {
                    Ok(command) => {
                        router.run(&mut editor, command, value.as_deref());
                        editor.emit_selection_change();
                        println!("{}", editor.model_html());
                    }
                    Err(err) => eprintln!("{err}"),
                }
            }
            _ => {
                editor.exec(EditorCommand::InsertText, Some(&line));
                println!("{}", editor.model_html());
            }
        }
    }
    drop(change_log);
}

fn print_help() {
    println!(
        "  :show                      print model HTML\n\
         \x20 :select <p.a.t.h> <a> <b>  select chars a..b of the text node at path\n\
         \x20 :exec <command> [value]    route an editor command\n\
         \x20 :key <combo>               press a shortcut, e.g. ctrl+b\n\
         \x20 :state                     selection toggle state\n\
         \x20 :toolbar                   built-in toolbar as JSON\n\
         \x20 :undo / :redo / :quit      what it says\n\
         \x20 anything else              insert as text"
    );
}

fn select<E: pan_core::CommandEngine>(editor: &mut Editor<E>, path: &str, from: &str, to: &str) {
    let parsed: Result<Vec<usize>, _> = path.split('.').map(str::parse).collect();
    let (Ok(path), Ok(from), Ok(to)) = (parsed, from.parse::<usize>(), to.parse::<usize>()) else {
        eprintln!("usage: :select 0.1 0 5");
        return;
    };
    editor.region_mut().set_selection(vec![DomRange::new(
        Caret::new(path.clone(), from),
        Caret::new(path, to),
    )]);
    editor.emit_selection_change();
}

fn run_shortcut<E: pan_core::CommandEngine>(
    editor: &mut Editor<E>,
    router: &mut CommandRouter,
    shortcuts: &ShortcutMap,
    combo: &str,
) {
    let mut event = KeyEvent::new("");
    for segment in combo.split('+') {
        match segment {
            "ctrl" => event.ctrl = true,
            "meta" => event.meta = true,
            "shift" => event.shift = true,
            key => event.key = key.to_string(),
        }
    }
    match shortcuts.lookup(&event) {
        Some(command) => {
            router.run(editor, command, None);
            println!("{}", editor.model_html());
        }
        None => println!("(unbound)"),
    }
}

/// Blocking prompt over stdin; an empty line cancels.
fn stdin_prompt(message: &str, initial: &str) -> Option<String> {
    print!("{message} [{initial}]: ");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line).ok()?;
    let line = line.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
