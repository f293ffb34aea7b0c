use crate::config::DrawerStyle;
use crate::events::AppEvent;
use crate::sys::SOCKET_PATH;
use async_channel::Sender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

/// One line of the control protocol.
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let mut words = line.split_whitespace();
    let event = match (words.next()?, words.next()) {
        ("show", None) => AppEvent::Show,
        ("hide", None) => AppEvent::Hide,
        ("reload", None) => AppEvent::ConfigReload,
        ("unhide", None) => AppEvent::UnhideAll,
        ("rotate", Some(steps)) => AppEvent::Rotate(steps.parse().ok()?),
        ("style", Some(style)) => AppEvent::SetStyle(style.parse::<DrawerStyle>().ok()?),
        _ => return None,
    };
    words.next().is_none().then_some(event)
}

pub async fn run_server(tx: Sender<AppEvent>) {
    if fs_err::metadata(SOCKET_PATH).is_ok() {
        let _ = fs_err::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };
    log::info!("listening on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match parse_command(&line) {
                            Some(event) => {
                                if tx.send(event).await.is_err() {
                                    break;
                                }
                            }
                            None => log::warn!("ignoring control command {:?}", line.trim()),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        let cases = vec![
            ("show", Some(AppEvent::Show)),
            ("  hide  ", Some(AppEvent::Hide)),
            ("reload", Some(AppEvent::ConfigReload)),
            ("unhide", Some(AppEvent::UnhideAll)),
            ("rotate 3", Some(AppEvent::Rotate(3))),
            ("rotate -2", Some(AppEvent::Rotate(-2))),
            ("style bubble", Some(AppEvent::SetStyle(DrawerStyle::Bubble))),
            ("style L", Some(AppEvent::SetStyle(DrawerStyle::List))),
            ("rotate", None),
            ("rotate lots", None),
            ("style square", None),
            ("show now", None),
            ("", None),
        ];
        for (line, expected) in cases {
            assert_eq!(parse_command(line), expected, "line {line:?}");
        }
    }
}
