use crate::{
    imp::{AuthMeta, HostMeta, Meta},
    pct_enc::{self, table::*, Table},
    span::Span,
};
use core::{
    net::{Ipv4Addr, Ipv6Addr},
    ops::{Deref, DerefMut},
};

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ParseErrorKind {
    /// Unexpected character or end of input.
    ///
    /// The error index points to the first byte of the character or the end of input.
    UnexpectedCharOrEnd,
    /// Invalid percent-encoded octet that is either non-hexadecimal or incomplete.
    ///
    /// The error index points to the percent character `'%'` of the octet.
    InvalidOctet,
    /// Invalid IPv6 address.
    ///
    /// The error index points to the first byte of the address.
    InvalidIpv6Addr,
}

/// A URI component, used to tell where a [`ParseError`] occurred.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Component {
    /// The scheme.
    Scheme,
    /// The authority, excluding a host or port already entered.
    Authority,
    /// The host subcomponent of authority.
    Host,
    /// The port subcomponent of authority.
    Port,
    /// The path.
    Path,
    /// The query.
    Query,
    /// The fragment.
    Fragment,
}

/// An error occurred when parsing a URI reference.
///
/// # Examples
///
/// ```
/// use uriref::{Component, ParseErrorKind, Uri};
///
/// let input = "http://example.com/a b";
/// let e = Uri::parse(input).unwrap_err();
/// assert_eq!(e.index(), 20);
/// assert_eq!(e.kind(), ParseErrorKind::UnexpectedCharOrEnd);
/// assert_eq!(e.component(), Component::Path);
/// assert_eq!(e.remaining(input), " b");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
    pub(crate) component: Component,
}

impl ParseError {
    /// Returns the index at which the error occurred.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Returns the component being parsed when the error occurred.
    #[must_use]
    pub fn component(&self) -> Component {
        self.component
    }

    /// Returns the part of `input` from the error index onward.
    ///
    /// `input` should be the string that failed to parse. An empty string
    /// is returned if the index is out of bounds of `input`.
    #[must_use]
    pub fn remaining<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.index..).unwrap_or_default()
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for ParseError {}

type Result<T> = core::result::Result<T, ParseError>;

/// Returns immediately with an error.
macro_rules! err {
    ($reader:expr, $index:expr, $kind:ident) => {
        return Err(ParseError {
            index: $index,
            kind: ParseErrorKind::$kind,
            component: $reader.component,
        })
    };
}

pub(crate) fn parse(bytes: &[u8]) -> Result<Meta> {
    let mut parser = Parser {
        reader: Reader::new(bytes, Component::Scheme),
        out: Meta::default(),
    };
    parser.parse_from_scheme().inspect_err(|e| {
        trace!(
            "parse failed at index {} in {:?}: {:?}",
            e.index,
            e.component,
            e.kind
        );
    })?;
    Ok(parser.out)
}

/// Validates a whole string as a single component.
pub(crate) fn validate(s: &str, table: Table, component: Component) -> Result<()> {
    let mut reader = Reader::new(s.as_bytes(), component);
    reader.read(table)?;
    if reader.has_remaining() {
        err!(reader, reader.pos, UnexpectedCharOrEnd);
    }
    Ok(())
}

/// URI reference parser.
///
/// # Invariants
///
/// `pos <= len` and `pos` is non-decreasing. Since only ASCII bytes
/// are ever consumed, `pos` is always on a character boundary.
///
/// # Guarantees
///
/// Start and finish parsing by calling `parse_from_scheme`.
/// When parsing succeeds, all output spans are within bounds,
/// correctly ordered, and denote validated components.
struct Parser<'a> {
    reader: Reader<'a>,
    out: Meta,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    component: Component,
}

impl<'a> Deref for Parser<'a> {
    type Target = Reader<'a>;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}

impl DerefMut for Parser<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.reader
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PathKind {
    General,
    AbEmpty,
    ContinuedNoScheme,
}

enum Seg {
    // *1":" 1*4HEXDIG
    Normal(u16, bool),
    // "::"
    Ellipsis,
    // *1":" 1*4HEXDIG "."
    MaybeV4(bool),
    // ":"
    SingleColon,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8], component: Component) -> Self {
        Reader {
            bytes,
            pos: 0,
            component,
        }
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.len()
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    // Any call to this method must keep the invariants.
    fn skip(&mut self, n: usize) {
        // INVARIANT: `pos` is non-decreasing.
        self.pos += n;
        debug_assert!(self.pos <= self.len());
    }

    /// Reads as many bytes as the table allows, returning whether anything was read.
    fn read(&mut self, table: Table) -> Result<bool> {
        let start = self.pos;
        let mut i = self.pos;

        while i < self.len() {
            let x = self.bytes[i];
            if x == b'%' && table.allows_pct_encoded() {
                match self.bytes.get(i + 1..i + 3) {
                    Some(&[hi, lo]) if pct_enc::is_hexdig_pair(hi, lo) => i += 3,
                    _ => err!(self, i, InvalidOctet),
                }
            } else if table.allows_ascii(x) {
                i += 1;
            } else {
                break;
            }
        }

        // INVARIANT: `i` is non-decreasing.
        self.pos = i;
        Ok(self.pos > start)
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            // INVARIANT: The remaining bytes start with `s` so it's fine to skip `s.len()`.
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    fn read_v6(&mut self) -> Option<[u16; 8]> {
        let mut segs = [0; 8];
        let mut ellipsis_idx = 8;

        let mut i = 0;
        while i < 8 {
            match self.read_v6_segment() {
                Some(Seg::Normal(seg, colon)) => {
                    if colon == (i == 0 || i == ellipsis_idx) {
                        // Leading colon, triple colons, or no colon.
                        return None;
                    }
                    segs[i] = seg;
                    i += 1;
                }
                Some(Seg::Ellipsis) => {
                    if ellipsis_idx != 8 {
                        // Multiple ellipses.
                        return None;
                    }
                    ellipsis_idx = i;
                }
                Some(Seg::MaybeV4(colon)) => {
                    if i > 6 || colon == (i == ellipsis_idx) {
                        // Not enough space, triple colons, or no colon.
                        return None;
                    }
                    let octets = self.read_v4()?.to_be_bytes();
                    segs[i] = u16::from_be_bytes([octets[0], octets[1]]);
                    segs[i + 1] = u16::from_be_bytes([octets[2], octets[3]]);
                    i += 2;
                    break;
                }
                Some(Seg::SingleColon) => return None,
                None => break,
            }
        }

        if ellipsis_idx == 8 {
            // No ellipsis.
            if i != 8 {
                // Too short.
                return None;
            }
        } else if i == 8 {
            // Eliding nothing.
            return None;
        } else {
            // Shift the segments after the ellipsis to the right.
            for j in (ellipsis_idx..i).rev() {
                segs[8 - (i - j)] = segs[j];
                segs[j] = 0;
            }
        }

        Some(segs)
    }

    fn read_v6_segment(&mut self) -> Option<Seg> {
        let colon = self.read_str(":");
        let Some(first) = self.peek(0) else {
            return colon.then_some(Seg::SingleColon);
        };

        let mut x = match pct_enc::decode_hexdigit(first) {
            Some(v) => u16::from(v),
            None => {
                return colon.then(|| {
                    if first == b':' {
                        // INVARIANT: Skipping ":" is fine.
                        self.skip(1);
                        Seg::Ellipsis
                    } else {
                        Seg::SingleColon
                    }
                });
            }
        };
        let mut i = 1;

        while i < 4 {
            let Some(b) = self.peek(i) else {
                // INVARIANT: Skipping `i` hexadecimal digits is fine.
                self.skip(i);
                return None;
            };
            match pct_enc::decode_hexdigit(b) {
                Some(v) => {
                    x = (x << 4) | u16::from(v);
                    i += 1;
                }
                None if b == b'.' => return Some(Seg::MaybeV4(colon)),
                None => break,
            }
        }
        // INVARIANT: Skipping `i` hexadecimal digits is fine.
        self.skip(i);
        Some(Seg::Normal(x, colon))
    }

    fn read_v4(&mut self) -> Option<u32> {
        let mut addr = self.read_v4_octet()? << 24;
        for i in (0..3).rev() {
            if !self.read_str(".") {
                return None;
            }
            addr |= self.read_v4_octet()? << (i * 8);
        }
        Some(addr)
    }

    fn read_v4_octet(&mut self) -> Option<u32> {
        let mut res = self.peek_digit(0)?;
        if res == 0 {
            // INVARIANT: Skipping "0" is fine.
            self.skip(1);
            return Some(0);
        }

        for i in 1..3 {
            let Some(x) = self.peek_digit(i) else {
                // INVARIANT: Skipping `i` digits is fine.
                self.skip(i);
                return Some(res);
            };
            res = res * 10 + x;
        }
        // INVARIANT: Skipping 3 digits is fine.
        self.skip(3);

        u8::try_from(res).is_ok().then_some(res)
    }

    fn peek_digit(&self, i: usize) -> Option<u32> {
        self.peek(i).and_then(|x| (x as char).to_digit(10))
    }

    fn read_ip_literal(&mut self) -> Result<Option<HostMeta>> {
        if !self.read_str("[") {
            return Ok(None);
        }

        let start = self.pos;

        let meta = if let Some(segs) = self.read_v6() {
            HostMeta::Ipv6(Ipv6Addr::from(segs))
        } else if self.pos == start {
            self.read_ipv_future()?;
            HostMeta::IpvFuture
        } else {
            err!(self, start, InvalidIpv6Addr);
        };

        if !self.read_str("]") {
            err!(self, self.pos, UnexpectedCharOrEnd);
        }
        Ok(Some(meta))
    }

    fn read_ipv_future(&mut self) -> Result<()> {
        if let Some(b'v' | b'V') = self.peek(0) {
            // INVARIANT: Skipping "v" or "V" is fine.
            self.skip(1);
            if self.read(HEXDIG)? && self.read_str(".") && self.read(IPV_FUTURE)? {
                return Ok(());
            }
        }
        err!(self, self.pos, UnexpectedCharOrEnd);
    }
}

/// Tells an IPv4 address from a registered name.
pub(crate) fn parse_v4_or_reg_name(bytes: &[u8]) -> HostMeta {
    let mut reader = Reader::new(bytes, Component::Host);
    match reader.read_v4() {
        Some(addr) if !reader.has_remaining() => HostMeta::Ipv4(Ipv4Addr::from(addr)),
        _ => HostMeta::RegName,
    }
}

impl Parser<'_> {
    fn read_v4_or_reg_name(&mut self) -> Result<HostMeta> {
        Ok(match (self.read_v4(), self.read(REG_NAME)?) {
            (Some(addr), false) => HostMeta::Ipv4(Ipv4Addr::from(addr)),
            _ => HostMeta::RegName,
        })
    }

    fn read_host(&mut self) -> Result<(Span, HostMeta)> {
        self.component = Component::Host;
        let start = self.pos;
        let meta = match self.read_ip_literal()? {
            Some(meta) => meta,
            None => self.read_v4_or_reg_name()?,
        };
        Ok((Span::new(start, self.pos), meta))
    }

    fn read_port(&mut self) -> Option<Span> {
        if !self.read_str(":") {
            return None;
        }
        self.component = Component::Port;
        let start = self.pos;
        let mut i = 0;
        while self.peek_digit(i).is_some() {
            i += 1;
        }
        // INVARIANT: Skipping `i` digits is fine.
        self.skip(i);
        Some(Span::new(start, self.pos))
    }

    fn parse_from_scheme(&mut self) -> Result<()> {
        self.read(SCHEME)?;

        if self.peek(0) == Some(b':') {
            // Scheme starts with a letter.
            if self.pos > 0 && self.bytes[0].is_ascii_alphabetic() {
                self.out.scheme = Some(Span::new(0, self.pos));
            } else {
                err!(self, 0, UnexpectedCharOrEnd);
            }

            // INVARIANT: Skipping ":" is fine.
            self.skip(1);
            return if self.read_str("//") {
                self.parse_from_authority()
            } else {
                self.parse_from_path(PathKind::General)
            };
        } else if self.pos == 0 {
            // Nothing read.
            if self.read_str("//") {
                return self.parse_from_authority();
            }
        }
        // Scheme chars are valid for path.
        self.parse_from_path(PathKind::ContinuedNoScheme)
    }

    fn parse_from_authority(&mut self) -> Result<()> {
        let auth_start = self.pos;

        // We first try to read host and port, noting that
        // a reg-name or IPv4address can also be part of userinfo.
        let (mut host, mut host_meta) = self.read_host()?;
        let mut port = self.read_port();
        let mut userinfo = None;

        if let HostMeta::Ipv4(_) | HostMeta::RegName = host_meta {
            self.component = Component::Authority;
            let userinfo_read = self.read(USERINFO)?;

            if self.peek(0) == Some(b'@') {
                userinfo = Some(Span::new(auth_start, self.pos));
                // INVARIANT: Skipping "@" is fine.
                self.skip(1);

                (host, host_meta) = self.read_host()?;
                port = self.read_port();
            } else if userinfo_read {
                err!(self, self.pos, UnexpectedCharOrEnd);
            }
        }

        if self.pos == auth_start && matches!(self.peek(0), None | Some(b'?' | b'#')) {
            // Nothing between "//" and the end of the reference.
            self.component = Component::Authority;
            err!(self, self.pos, UnexpectedCharOrEnd);
        }

        self.out.auth = Some(AuthMeta {
            span: Span::new(auth_start, self.pos),
            userinfo,
            host,
            host_meta,
            port,
        });
        self.parse_from_path(PathKind::AbEmpty)
    }

    fn parse_from_path(&mut self, kind: PathKind) -> Result<()> {
        let path_start = match kind {
            PathKind::General => {
                self.component = Component::Path;
                self.pos
            }
            PathKind::AbEmpty => {
                if self.peek(0) == Some(b'/') {
                    self.component = Component::Path;
                }
                self.pos
            }
            PathKind::ContinuedNoScheme => {
                self.component = Component::Path;
                self.read(SEGMENT_NZ_NC)?;

                if self.peek(0) == Some(b':') {
                    // In a relative reference, the first path
                    // segment cannot contain a colon character.
                    err!(self, self.pos, UnexpectedCharOrEnd);
                }
                0
            }
        };

        if self.read(PATH)? && kind == PathKind::AbEmpty && self.bytes[path_start] != b'/' {
            err!(self, path_start, UnexpectedCharOrEnd);
        }

        self.out.path = Span::new(path_start, self.pos);

        if self.read_str("?") {
            self.component = Component::Query;
            let start = self.pos;
            self.read(QUERY)?;
            self.out.query = Some(Span::new(start, self.pos));
        }

        if self.read_str("#") {
            self.component = Component::Fragment;
            let start = self.pos;
            self.read(FRAGMENT)?;
            self.out.fragment = Some(Span::new(start, self.pos));
        }

        if self.has_remaining() {
            err!(self, self.pos, UnexpectedCharOrEnd);
        }
        Ok(())
    }
}
