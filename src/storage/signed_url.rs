// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use chrono::{DateTime, Duration as ChronoDuration, NaiveDateTime, Utc};
use std::time::Duration;
use url::Url;

/// Lifetime of every signed download URL
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(15 * 60);

const GOOG_DATE_PARAM: &str = "X-Goog-Date";
const GOOG_EXPIRES_PARAM: &str = "X-Goog-Expires";
const GOOG_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Expiry instant encoded in a V4 signed URL.
///
/// V4 URLs carry the signing time (`X-Goog-Date`) and a lifetime in seconds
/// (`X-Goog-Expires`). Returns `None` when either is missing or malformed.
pub fn signed_url_expiry(url: &Url) -> Option<DateTime<Utc>> {
    let mut signed_at = None;
    let mut expires_in = None;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            GOOG_DATE_PARAM => {
                signed_at = NaiveDateTime::parse_from_str(&value, GOOG_DATE_FORMAT)
                    .ok()
                    .map(|naive| naive.and_utc());
            }
            GOOG_EXPIRES_PARAM => expires_in = value.parse::<i64>().ok(),
            _ => (),
        }
    }

    signed_at?.checked_add_signed(ChronoDuration::try_seconds(expires_in?)?)
}

/// Format a timestamp the way `X-Goog-Date` expects it.
pub fn goog_date(at: DateTime<Utc>) -> String {
    at.format(GOOG_DATE_FORMAT).to_string()
}
