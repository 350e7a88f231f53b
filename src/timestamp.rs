use crate::error::Error;

/// Convert a backend-supplied `HH:MM:SS` label into a seek offset in seconds.
///
/// Labels are trusted to come from the backend; anything that is not exactly
/// three integer components is [`Error::Decode`], which callers catch at the
/// click boundary — it never propagates past a single click.
pub fn decode(label: &str) -> Result<u64, Error> {
  let parts: Vec<&str> = label.split(':').collect();
  if parts.len() != 3 {
    return Err(Error::Decode(label.to_string()));
  }
  let component =
    |raw: &str| -> Result<u64, Error> { raw.trim().parse::<u64>().map_err(|_| Error::Decode(label.to_string())) };
  let (hours, minutes, seconds) = (component(parts[0])?, component(parts[1])?, component(parts[2])?);
  // A parseable-but-absurd hour count must not overflow past this boundary.
  hours
    .checked_mul(3600)
    .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
    .and_then(|total| total.checked_add(seconds))
    .ok_or_else(|| Error::Decode(label.to_string()))
}
