use std::io;

use uriref::Uri;

fn main() {
    for line in io::stdin().lines() {
        let line = line.expect("failed to read line");
        let line = line.trim_end_matches('\r');

        let uri = match Uri::parse(line) {
            Ok(uri) => uri,
            Err(e) => {
                println!("URI parse failed at: `{}'", e.remaining(line));
                println!("  {e}");
                continue;
            }
        };

        println!("scheme:    {:?}", uri.scheme().map(|s| s.as_str()));
        if let Some(auth) = uri.authority() {
            println!("userinfo:  {:?}", auth.userinfo().map(|s| s.as_str()));
            println!("host:      {:?} ({:?})", auth.host(), auth.host_kind());
            println!("port:      {:?}", auth.port_to_u16().ok().flatten());
        }
        println!("path:      {:?}", uri.path().as_str());
        println!(
            "segments:  {:?}",
            uri.path_segments().map(|s| s.as_str()).collect::<Vec<_>>()
        );
        println!("query:     {:?}", uri.query().map(|s| s.as_str()));
        for pair in uri.query_pairs() {
            println!("  {} = {:?}", pair.key, pair.value);
        }
        println!("fragment:  {:?}", uri.fragment().map(|s| s.as_str()));
        println!("normal:    {}", uri.normalize());
    }
}
