//! Typed response payloads and their wire encoders.
//!
//! Encoders only see the connection, the response value and the command's
//! area; everything they emit sits between the command line and the
//! dispatcher's status/end-of-response trailer.

use std::io::{Read, Write};

use vcbridge_backend::AssetList;
use vcbridge_core::{Changelist, ConfigField, CustomCommandDesc, PluginTraits, StateOverlay};
use vcbridge_protocol::{Area, Connection};

use crate::error::EngineResult;

/// The one tagged-union response type the dispatcher table operates on.
#[derive(Debug)]
pub enum Response {
    /// Streamed asset list (most asset commands).
    Assets(AssetList),
    Changes(Vec<Changelist>),
    /// Single data value (changeDescription, pluginVersions).
    Text(String),
    /// Everything `pluginTraits` emits, in fixed order.
    Traits {
        traits: PluginTraits,
        fields: Vec<ConfigField>,
        custom: Vec<CustomCommandDesc>,
        overlays: Vec<StateOverlay>,
    },
    /// Names of required config fields still awaiting a value.
    FieldNames(Vec<String>),
    /// No payload; the dispatcher trailer is the whole reply.
    None,
}

pub fn encode_assets<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    response: &Response,
    area: Area,
) -> EngineResult<()> {
    match response {
        Response::Assets(assets) => {
            conn.write_asset_list(assets, area)?;
            Ok(())
        }
        // Connectivity failures reach the encoder with no payload.
        Response::None => Ok(()),
        _ => unreachable_response(),
    }
}

pub fn encode_changes<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    response: &Response,
    area: Area,
) -> EngineResult<()> {
    match response {
        Response::Changes(changes) => {
            conn.write_changelist_list(changes, area)?;
            Ok(())
        }
        Response::None => Ok(()),
        _ => unreachable_response(),
    }
}

pub fn encode_text<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    response: &Response,
    area: Area,
) -> EngineResult<()> {
    match response {
        Response::Text(text) => {
            conn.data(text, area)?;
            Ok(())
        }
        Response::None => Ok(()),
        _ => unreachable_response(),
    }
}

/// Fixed emission order: set traits, declared config fields, custom
/// commands, then overlays. Password field values are redacted in the
/// diagnostic log but still reach the host.
pub fn encode_traits<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    response: &Response,
    area: Area,
) -> EngineResult<()> {
    match response {
        Response::Traits {
            traits,
            fields,
            custom,
            overlays,
        } => {
            let set: Vec<&str> = traits
                .entries()
                .into_iter()
                .filter(|(_, enabled)| *enabled)
                .map(|(name, _)| name)
                .collect();
            conn.write_count(set.len(), area)?;
            for name in set {
                conn.data(name, area)?;
            }

            conn.write_count(fields.len(), area)?;
            for field in fields {
                conn.data(&field.name, area)?;
                conn.data(&field.label, area)?;
                conn.data(&field.description, area)?;
                conn.data(&field.default_value, area)?;
                if field.is_password() {
                    conn.write_secret_value(&field.value, vcbridge_protocol::Channel::Data, area)?;
                } else {
                    conn.data(&field.value, area)?;
                }
                conn.data(&field.flags.bits().to_string(), area)?;
            }

            conn.write_count(custom.len(), area)?;
            for command in custom {
                conn.data(&command.name, area)?;
                conn.data(&command.label, area)?;
            }

            conn.write_count(overlays.len(), area)?;
            for overlay in overlays {
                conn.data(&overlay.state.bits().to_string(), area)?;
                conn.data(&overlay.overlay, area)?;
            }
            Ok(())
        }
        Response::None => Ok(()),
        _ => unreachable_response(),
    }
}

/// `pluginConfig` replies depend on the key: `pluginVersions` answers with
/// the selected version, `pluginTraits` with the full capability dump, and
/// every other key with nothing.
pub fn encode_config<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    response: &Response,
    area: Area,
) -> EngineResult<()> {
    match response {
        Response::Text(_) => encode_text(conn, response, area),
        Response::Traits { .. } => encode_traits(conn, response, area),
        Response::None => Ok(()),
        _ => unreachable_response(),
    }
}

pub fn encode_field_names<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    response: &Response,
    area: Area,
) -> EngineResult<()> {
    match response {
        Response::FieldNames(names) => {
            conn.write_count(names.len(), area)?;
            for name in names {
                conn.data(name, area)?;
            }
            Ok(())
        }
        Response::None => Ok(()),
        _ => unreachable_response(),
    }
}

pub fn encode_none<R: Read, W: Write>(
    _conn: &mut Connection<R, W>,
    _response: &Response,
    _area: Area,
) -> EngineResult<()> {
    Ok(())
}

fn unreachable_response() -> EngineResult<()> {
    Err(crate::error::EngineError::Contract(
        "response variant does not match the command's encoder",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use vcbridge_core::{AssetState, ConfigFieldFlags, VersionedAsset};

    fn conn() -> Connection<Cursor<Vec<u8>>, Vec<u8>> {
        Connection::new(Cursor::new(Vec::new()), Vec::new())
    }

    fn output(c: Connection<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        let (_, out) = c.into_parts();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_encode_assets_frames_list() {
        let mut c = conn();
        let mut asset = VersionedAsset::new("a.png");
        asset.add_state(AssetState::LOCAL);
        encode_assets(&mut c, &Response::Assets(vec![asset]), Area::GENERAL).unwrap();
        assert_eq!(output(c), "o1:-1\no1:a.png\no1:1\no1:endOfList\n");
    }

    #[test]
    fn test_encode_traits_order() {
        let mut c = conn();
        let response = Response::Traits {
            traits: PluginTraits {
                enables_checkout: true,
                ..Default::default()
            },
            fields: vec![ConfigField::new(
                "Server",
                "Server",
                "Remote address",
                "localhost",
                ConfigFieldFlags::empty(),
            )],
            custom: vec![],
            overlays: vec![],
        };
        encode_traits(&mut c, &response, Area::CONFIG).unwrap();
        let text = output(c);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "o8:1");
        assert_eq!(lines[1], "o8:enablesCheckout");
        assert_eq!(lines[2], "o8:1");
        assert_eq!(lines[3], "o8:Server");
        // trailing custom-command and overlay counts
        assert_eq!(lines[lines.len() - 2], "o8:0");
        assert_eq!(lines[lines.len() - 1], "o8:0");
    }

    #[test]
    fn test_variant_mismatch_is_contract_error() {
        let mut c = conn();
        assert!(encode_assets(&mut c, &Response::Text("x".into()), Area::GENERAL).is_err());
    }
}
