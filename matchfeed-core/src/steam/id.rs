use crate::error::SteamIdError;

/// Difference between a 64-bit Steam id and the 32-bit account id it wraps.
pub const STEAM_ID64_OFFSET: u64 = 76_561_197_960_265_728;

/// Account id the match API reports for players with match data exposure disabled.
pub const ANONYMOUS_ACCOUNT_ID: u32 = 4_294_967_295;

pub fn convert_32_to_64(account_id: u32) -> u64 {
    // Cannot overflow: offset + u32::MAX < u64::MAX.
    STEAM_ID64_OFFSET + u64::from(account_id)
}

pub fn convert_64_to_32(steam_id: u64) -> Result<u32, SteamIdError> {
    steam_id
        .checked_sub(STEAM_ID64_OFFSET)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| SteamIdError::OutOfRange(steam_id.to_string()))
}

pub fn convert_32_to_64_str(account_id: &str) -> Result<String, SteamIdError> {
    let id = parse_decimal(account_id)?;
    let id = u32::try_from(id).map_err(|_| SteamIdError::OutOfRange(account_id.trim().to_string()))?;
    Ok(convert_32_to_64(id).to_string())
}

pub fn convert_64_to_32_str(steam_id: &str) -> Result<String, SteamIdError> {
    let id = parse_decimal(steam_id)?;
    Ok(convert_64_to_32(id)?.to_string())
}

fn parse_decimal(s: &str) -> Result<u64, SteamIdError> {
    let t = s.trim();
    if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SteamIdError::Parse(s.to_string()));
    }
    // All digits, so the only failure left is overflow.
    t.parse::<u64>()
        .map_err(|_| SteamIdError::OutOfRange(t.to_string()))
}
