use std::io;
use std::net::Ipv4Addr;

/// IPv4 addresses of every local interface, loopback included.
#[cfg(unix)]
pub fn interface_addresses() -> io::Result<Vec<Ipv4Addr>> {
    let mut head: *mut libc::ifaddrs = std::ptr::null_mut();
    if unsafe { libc::getifaddrs(&mut head) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let mut found = Vec::new();
    let mut cursor = head;
    while !cursor.is_null() {
        let entry = unsafe { &*cursor };
        let addr = entry.ifa_addr;
        if !addr.is_null() && i32::from(unsafe { (*addr).sa_family }) == libc::AF_INET {
            let inet = unsafe { &*(addr as *const libc::sockaddr_in) };
            found.push(Ipv4Addr::from(u32::from_be(inet.sin_addr.s_addr)));
        }
        cursor = entry.ifa_next;
    }
    unsafe { libc::freeifaddrs(head) };
    Ok(found)
}

#[cfg(not(unix))]
pub fn interface_addresses() -> io::Result<Vec<Ipv4Addr>> {
    Ok(Vec::new())
}

pub fn lan_urls(addresses: &[Ipv4Addr], port: u16) -> Vec<String> {
    let mut urls: Vec<String> = addresses
        .iter()
        .filter(|addr| !addr.is_loopback() && !addr.is_unspecified())
        .map(|addr| format!("http://{addr}:{port}"))
        .collect();
    urls.dedup();
    urls
}

pub fn print_lan_urls(port: u16) -> io::Result<()> {
    let urls = lan_urls(&interface_addresses()?, port);
    if urls.is_empty() {
        println!("no LAN address found; try http://localhost:{port}");
        return Ok(());
    }
    for url in urls {
        println!("{url}");
    }
    Ok(())
}
