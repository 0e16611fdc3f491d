//! Output device discovery via cpal.

use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, Host};

use crate::{Error, Result};

pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Output device information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDevice {
    /// Position in the host's output device list.
    pub index: usize,
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Whether this is the system default output.
    pub is_default: bool,
}

/// List the output devices of the default host.
pub fn list_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let default_name = host
        .default_output_device()
        .and_then(|d| device_name(&d).ok());

    let Ok(outputs) = host.output_devices() else {
        return Ok(Vec::new());
    };

    Ok(outputs
        .enumerate()
        .filter_map(|(index, device)| {
            let name = device_name(&device).ok()?;
            let default_sample_rate = device
                .default_output_config()
                .map(|c| c.sample_rate())
                .unwrap_or(48000);
            Some(AudioDevice {
                index,
                is_default: default_name.as_deref() == Some(name.as_str()),
                name,
                default_sample_rate,
            })
        })
        .collect())
}

/// The default output device, if the host has one.
pub fn default_output_device() -> Result<Option<AudioDevice>> {
    Ok(list_devices()?.into_iter().find(|d| d.is_default))
}

/// Find an output device by index, exact name, or case-insensitive partial name.
pub fn find_output_device(name_or_index: &str) -> Result<AudioDevice> {
    let devices = list_devices()?;
    let names: Vec<&str> = devices.iter().map(|d| d.name.as_str()).collect();
    let position = match_device(&names, name_or_index)?;
    Ok(devices[position].clone())
}

/// Resolve `name_or_index` to a cpal device on `host`.
pub(crate) fn resolve_output_device(host: &Host, name_or_index: Option<&str>) -> Result<Device> {
    let Some(search) = name_or_index else {
        return host.default_output_device().ok_or(Error::NoDevice);
    };

    let devices: Vec<Device> = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?
        .collect();
    let names: Vec<String> = devices
        .iter()
        .map(|d| device_name(d).unwrap_or_default())
        .collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let position = match_device(&names, search)?;
    Ok(devices[position].clone())
}

/// Index into `names` matching `name_or_index`.
fn match_device(names: &[&str], name_or_index: &str) -> Result<usize> {
    if let Ok(index) = name_or_index.parse::<usize>() {
        return if index < names.len() {
            Ok(index)
        } else {
            Err(Error::DeviceNotFound(format!(
                "output device index {} (only {} devices available)",
                index,
                names.len()
            )))
        };
    }

    if let Some(exact) = names.iter().position(|n| *n == name_or_index) {
        return Ok(exact);
    }

    let search_lower = name_or_index.to_lowercase();
    let matches: Vec<usize> = names
        .iter()
        .enumerate()
        .filter(|(_, n)| n.to_lowercase().contains(&search_lower))
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [] => Err(Error::DeviceNotFound(format!(
            "no output device matching '{}'",
            name_or_index
        ))),
        [only] => Ok(*only),
        [first, ..] => {
            tracing::warn!(
                search = name_or_index,
                candidates = matches.len(),
                chosen = names[*first],
                "device name is ambiguous, using first match"
            );
            Ok(*first)
        }
    }
}
