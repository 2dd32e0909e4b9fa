//! Interactive session: replays form edits, city picks, map moves and
//! location requests against one controller.

use storefinder_client::SearchController;
use storefinder_core::{AppConfig, City, ParamField, Position};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::locate::Locator;
use crate::render;

const HELP: &str = "\
Commands:
  set <field> <value>     edit a form field (latitude, longitude, maxRadius, limit, onlyOpen)
  search | submit         search with the current form values
  city <name>             centre on a city and search
  cities                  list the cities on offer
  locate [LAT,LNG]        search around your location
  map <lat> <lng> [zoom]  move the map; with a zoom level the radius follows the zoom
  show                    print the current view
  help                    this text
  quit | exit             leave the session";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SessionCommand {
    Set { field: ParamField, value: String },
    Submit,
    City(String),
    Cities,
    Locate(Option<Position>),
    Map {
        latitude: f64,
        longitude: f64,
        zoom: Option<f64>,
    },
    Show,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub(crate) fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let line = line.trim();
    let Some((head, rest)) = split_word(line) else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "set" => {
            let (field, value) = split_word(rest)
                .filter(|(_, value)| !value.is_empty())
                .ok_or("usage: set <field> <value>")?;
            let field: ParamField = field.parse().map_err(|e| format!("{e}"))?;
            SessionCommand::Set {
                field,
                value: value.to_string(),
            }
        }
        "search" | "submit" => SessionCommand::Submit,
        "city" => {
            if rest.is_empty() {
                return Err("usage: city <name>".to_string());
            }
            SessionCommand::City(rest.to_string())
        }
        "cities" => SessionCommand::Cities,
        "locate" => {
            if rest.is_empty() {
                SessionCommand::Locate(None)
            } else {
                SessionCommand::Locate(Some(crate::parse_position(rest)?))
            }
        }
        "map" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            if !(2..=3).contains(&parts.len()) {
                return Err("usage: map <lat> <lng> [zoom]".to_string());
            }
            let number = |raw: &str, what: &str| {
                raw.parse::<f64>()
                    .map_err(|e| format!("invalid {what} '{raw}': {e}"))
            };
            SessionCommand::Map {
                latitude: number(parts[0], "latitude")?,
                longitude: number(parts[1], "longitude")?,
                zoom: parts.get(2).map(|z| number(z, "zoom")).transpose()?,
            }
        }
        "show" => SessionCommand::Show,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{other}'; type `help`")),
    };
    Ok(Some(command))
}

fn split_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Some(match s.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (s, ""),
    })
}

/// Run the session until `quit` or end of input. An initial search with
/// the default form runs first.
pub(crate) async fn run_session(
    mut controller: SearchController,
    config: &AppConfig,
    cities: &[City],
) -> anyhow::Result<()> {
    controller.submit().await;
    print_view(&controller);
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            SessionCommand::Set { field, value } => {
                match controller.set_from_manual_input(field, &value) {
                    Ok(()) => println!("{field} = {value}"),
                    Err(e) => eprintln!("{e}"),
                }
            }
            SessionCommand::Submit => {
                controller.submit().await;
                print_view(&controller);
            }
            SessionCommand::City(name) => match storefinder_core::find_city(cities, &name) {
                Some(city) => {
                    controller.set_from_city_selection(city).await;
                    print_view(&controller);
                }
                None => eprintln!("unknown city '{name}'; type `cities` for the list"),
            },
            SessionCommand::Cities => print!("{}", render::render_cities(cities)),
            SessionCommand::Locate(gps) => match Locator::select(gps, config) {
                Ok(locator) => {
                    controller
                        .locate_and_search(&locator, &config.geolocation)
                        .await;
                    print_view(&controller);
                }
                Err(e) => eprintln!("{e}"),
            },
            SessionCommand::Map {
                latitude,
                longitude,
                zoom: Some(zoom),
            } => {
                controller.on_zoom_end(latitude, longitude, zoom).await;
                print_view(&controller);
            }
            SessionCommand::Map {
                latitude,
                longitude,
                zoom: None,
            } => {
                controller
                    .set_from_map_interaction(latitude, longitude, None, None)
                    .await;
                print_view(&controller);
            }
            SessionCommand::Show => print_view(&controller),
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Quit => break,
        }
    }

    tracing::debug!("session ended");
    Ok(())
}

fn print_view(controller: &SearchController) {
    println!(
        "{}",
        render::render_view(controller, chrono::Local::now().time())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_no_command() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn set_accepts_field_aliases() {
        assert_eq!(
            parse_command("set radius 12.5"),
            Ok(Some(SessionCommand::Set {
                field: ParamField::MaxRadius,
                value: "12.5".to_string()
            }))
        );
    }

    #[test]
    fn set_without_value_is_usage_error() {
        assert!(parse_command("set limit").is_err());
        assert!(parse_command("set colour red").is_err());
    }

    #[test]
    fn city_keeps_multi_word_names() {
        assert_eq!(
            parse_command("city Den Haag"),
            Ok(Some(SessionCommand::City("Den Haag".to_string())))
        );
    }

    #[test]
    fn locate_with_and_without_position() {
        assert_eq!(parse_command("locate"), Ok(Some(SessionCommand::Locate(None))));
        let Ok(Some(SessionCommand::Locate(Some(pos)))) = parse_command("locate 51.92, 4.48")
        else {
            panic!("expected locate with position");
        };
        assert!((pos.latitude - 51.92).abs() < f64::EPSILON);
    }

    #[test]
    fn map_with_optional_zoom() {
        assert_eq!(
            parse_command("map 52.37 4.89"),
            Ok(Some(SessionCommand::Map {
                latitude: 52.37,
                longitude: 4.89,
                zoom: None
            }))
        );
        assert_eq!(
            parse_command("MAP 52.37 4.89 11"),
            Ok(Some(SessionCommand::Map {
                latitude: 52.37,
                longitude: 4.89,
                zoom: Some(11.0)
            }))
        );
        assert!(parse_command("map 52.37").is_err());
        assert!(parse_command("map north 4.89").is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(parse_command("teleport").is_err());
    }
}
