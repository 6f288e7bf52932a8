//! Payment links.
//!
//! A payment link is `{base_url}/payment?data={token}`. The token is added
//! through the URL query encoder, so the link stays well-formed whatever
//! alphabet the token uses.

use crate::token::PaymentToken;
use url::Url;

/// Path of the payment page, relative to the public base URL.
pub const PAYMENT_PATH: &str = "payment";

/// Name of the query parameter carrying the payment token.
pub const DATA_PARAM: &str = "data";

/// Build the payment link for `token`.
///
/// A path prefix on `base_url` is kept (`https://example.com/shop` gives
/// `https://example.com/shop/payment?data=…`). Any query or fragment on
/// `base_url` is dropped.
pub fn payment_url(base_url: &Url, token: &PaymentToken) -> Result<Url, url::ParseError> {
    let mut url = base_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .push(PAYMENT_PATH);
    url.query_pairs_mut().append_pair(DATA_PARAM, token.as_str());
    Ok(url)
}

/// The query-decoded `data` parameter of a payment link, if any.
pub fn token_from_payment_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == DATA_PARAM)
        .map(|(_, value)| value.into_owned())
}
