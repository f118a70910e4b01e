//! Percent-encoders for URI components.

use super::{table::*, Encoder, Table};

/// An encoder for userinfo.
#[derive(Debug)]
pub struct Userinfo(());

impl Encoder for Userinfo {
    const TABLE: Table = USERINFO;
}

/// An encoder for registered name.
#[derive(Debug)]
pub struct RegName(());

impl Encoder for RegName {
    const TABLE: Table = REG_NAME;
}

/// An encoder for port.
#[derive(Debug)]
pub struct Port(());

impl Encoder for Port {
    const TABLE: Table = PORT;
}

/// An encoder for path.
///
/// [`EStr`] has [extension methods] for the path component.
///
/// [`EStr`]: super::EStr
/// [extension methods]: super::EStr#impl-EStr<Path>
#[derive(Debug)]
pub struct Path(());

impl Encoder for Path {
    const TABLE: Table = PATH;
}

/// An encoder for query.
#[derive(Debug)]
pub struct Query(());

impl Encoder for Query {
    const TABLE: Table = QUERY;
}

/// An encoder for fragment.
#[derive(Debug)]
pub struct Fragment(());

impl Encoder for Fragment {
    const TABLE: Table = FRAGMENT;
}

/// An encoder for data that must never be mistaken for a delimiter.
///
/// Everything except `unreserved` characters is percent-encoded,
/// which makes it suitable for keys and values in a query.
#[derive(Debug)]
pub struct Data(());

impl Encoder for Data {
    const TABLE: Table = DATA;
}
