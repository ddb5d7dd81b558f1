use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, FocusedPanel, InputMode, Popup};
use crate::brew::CommandKind;
use crate::runtime::messages::EventSender;

const PAGE: isize = 10;

pub fn handle_key_event(
    app: &mut App,
    key: KeyEvent,
    tx: &EventSender,
) -> Option<anyhow::Result<()>> {
    app.needs_redraw = true;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Ok(()));
    }

    if app.popup.is_some() {
        handle_popup_key(app, key, tx);
        return None;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode_key(app, key, tx),
        InputMode::EditSearch => {
            handle_search_mode_key(app, key, tx);
            None
        }
    }
}

fn handle_popup_key(app: &mut App, key: KeyEvent, tx: &EventSender) {
    let Some(popup) = app.popup.as_ref() else {
        return;
    };

    match popup {
        Popup::ConfirmUninstall { pkg } => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let pkg = pkg.clone();
                app.close_popup();
                app.request_package_command(CommandKind::Uninstall, &pkg, tx);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
                app.close_popup();
                app.set_status("Canceled");
            }
            _ => {}
        },
        Popup::Error { .. } => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.close_popup();
            }
        }
        Popup::Info { .. } if key.code == KeyCode::Char('c') => app.copy_info(),
        Popup::Info { .. } | Popup::Log { .. } | Popup::Help { .. } => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                app.close_popup();
            }
            KeyCode::Down | KeyCode::Char('j') => app.scroll_popup(1),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_popup(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_popup(PAGE),
            KeyCode::PageUp => app.scroll_popup(-PAGE),
            KeyCode::Home | KeyCode::Char('g') => app.scroll_popup(isize::MIN),
            KeyCode::End | KeyCode::Char('G') => app.scroll_popup(isize::MAX),
            _ => {}
        },
    }
}

fn handle_search_mode_key(app: &mut App, key: KeyEvent, tx: &EventSender) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_status("Search canceled");
        }
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            app.request_search(tx);
        }
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
        }
        _ => {}
    }
}

fn handle_normal_mode_key(
    app: &mut App,
    key: KeyEvent,
    tx: &EventSender,
) -> Option<anyhow::Result<()>> {
    match key.code {
        KeyCode::Char('q') => return Some(Ok(())),
        KeyCode::Tab => app.cycle_focus(),
        KeyCode::BackTab => app.cycle_focus_back(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Char('/') => {
            app.focus_panel = FocusedPanel::Candidates;
            app.input_mode = InputMode::EditSearch;
            app.set_status("Type a keyword, Enter to search");
        }
        KeyCode::Char('r') => {
            app.search_query.clear();
            app.show_recommendations();
        }
        KeyCode::Char('i') => match app.selected_candidate().map(str::to_string) {
            Some(pkg) => {
                app.start_install(&pkg, tx);
            }
            None => app.set_status("Select a candidate to install"),
        },
        KeyCode::Enter => match app.selected_package_name().map(str::to_string) {
            Some(pkg) => app.request_info(&pkg, tx),
            None => app.set_status("No package selected"),
        },
        KeyCode::Char('l') => app.open_selected_log(),
        KeyCode::Char('x') => app.dismiss_selected_task(),
        KeyCode::Char('u') => match app.selected_package_name().map(str::to_string) {
            Some(pkg) => app.confirm_uninstall(&pkg),
            None => app.set_status("No package selected"),
        },
        KeyCode::Char('U') => match app.selected_package_name().map(str::to_string) {
            Some(pkg) => app.request_package_command(CommandKind::Upgrade, &pkg, tx),
            None => app.set_status("No package selected"),
        },
        KeyCode::Char('R') => app.request_installed(tx),
        KeyCode::Char('t') => app.cycle_theme(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState};

    use super::*;
    use crate::config::Settings;
    use crate::runtime::messages::create_channel;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new(Settings::default());
        let (tx, _rx) = create_channel();
        assert!(handle_key_event(&mut app, press(KeyCode::Char('q')), &tx).is_some());

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.popup = Some(Popup::Help { scroll: 0 });
        assert!(handle_key_event(&mut app, ctrl_c, &tx).is_some());
    }

    #[test]
    fn typing_edits_the_search_keyword() {
        let mut app = App::new(Settings::default());
        let (tx, _rx) = create_channel();

        handle_key_event(&mut app, press(KeyCode::Char('/')), &tx);
        assert_eq!(app.input_mode, InputMode::EditSearch);
        for c in "wgetx".chars() {
            handle_key_event(&mut app, press(KeyCode::Char(c)), &tx);
        }
        handle_key_event(&mut app, press(KeyCode::Backspace), &tx);
        assert_eq!(app.search_query, "wget");

        // q is text while editing, not quit
        assert!(handle_key_event(&mut app, press(KeyCode::Char('q')), &tx).is_none());
        handle_key_event(&mut app, press(KeyCode::Esc), &tx);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.search_query, "wgetq");
    }

    #[test]
    fn uninstall_waits_for_confirmation() {
        let mut app = App::new(Settings::default());
        let (tx, _rx) = create_channel();
        app.installed = vec!["wget".to_string()];
        app.installed_selected = Some(0);
        app.focus_panel = FocusedPanel::Installed;

        handle_key_event(&mut app, press(KeyCode::Char('u')), &tx);
        assert_eq!(
            app.popup,
            Some(Popup::ConfirmUninstall {
                pkg: "wget".to_string()
            })
        );

        handle_key_event(&mut app, press(KeyCode::Char('n')), &tx);
        assert!(app.popup.is_none());
        assert_eq!(app.status, "Canceled");
    }

    #[test]
    fn copy_key_in_info_popup_needs_loaded_info() {
        let mut app = App::new(Settings::default());
        let (tx, _rx) = create_channel();
        app.popup = Some(Popup::Info {
            pkg: "wget".to_string(),
            scroll: 0,
        });

        handle_key_event(&mut app, press(KeyCode::Char('c')), &tx);
        assert_eq!(app.status, "No info loaded for wget");
        assert!(app.popup.is_some());
    }

    #[test]
    fn running_tasks_are_not_dismissed() {
        let mut app = App::new(Settings::default());
        let (tx, _rx) = create_channel();
        assert!(app.tasks.try_start("wget", 200));
        app.tasks_selected = Some(0);

        handle_key_event(&mut app, press(KeyCode::Char('x')), &tx);
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.status, "Running installs cannot be dismissed");
    }
}
