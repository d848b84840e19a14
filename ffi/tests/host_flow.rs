//! Drive the C ABI the way a mobile host does, against the live mock server.
//!
//! The test plays the host: it reads the `FfiHttpRequest`, executes it with
//! ureq, and passes an `FfiHttpResponse` back through the ABI.

use std::ffi::{CStr, CString};

use catalog_ffi::types::{
    FfiCatalogResult, FfiCatalogSession, FfiDataTag, FfiErrorCode, FfiFilmList, FfiHttpResponse,
};
use catalog_ffi::*;

fn spawn_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// Execute the library's request and return `(status, body)`.
fn host_fetch(session: *const FfiCatalogSession) -> (u16, String) {
    let req = catalog_build_fetch_request(session);
    assert!(!req.is_null());
    let req_ref = unsafe { &*req };
    let url = unsafe { CStr::from_ptr(req_ref.url) }.to_str().unwrap().to_string();
    let headers = unsafe { std::slice::from_raw_parts(req_ref.headers, req_ref.headers_len as usize) };

    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let mut builder = agent.get(&url);
    for h in headers {
        let key = unsafe { CStr::from_ptr(h.key) }.to_str().unwrap();
        let value = unsafe { CStr::from_ptr(h.value) }.to_str().unwrap();
        builder = builder.header(key, value);
    }
    let mut response = builder.call().expect("HTTP transport error");
    catalog_free_request(req);

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    (status, body)
}

fn film_ids(result: *const FfiCatalogResult) -> Vec<String> {
    let r = unsafe { &*result };
    assert_eq!(r.error_code, FfiErrorCode::Ok);
    assert_eq!(r.data_tag, FfiDataTag::FilmList);
    let list = unsafe { &*(r.data as *const FfiFilmList) };
    if list.len == 0 {
        return Vec::new();
    }
    unsafe { std::slice::from_raw_parts(list.items, list.len as usize) }
        .iter()
        .map(|f| unsafe { CStr::from_ptr(f.id) }.to_str().unwrap().to_string())
        .collect()
}

#[test]
fn host_loads_and_favorites_through_the_abi() {
    let addr = spawn_server();
    let base_url = CString::new(format!("http://{addr}")).unwrap();
    let session = catalog_session_new(base_url.as_ptr());

    // Step 1: host performs the fetch and applies it.
    let (status, body) = host_fetch(session);
    assert_eq!(status, 200);
    let body = CString::new(body).unwrap();
    let response = FfiHttpResponse {
        status,
        body: body.as_ptr(),
    };
    let result = catalog_session_apply_response(session, &response);
    let ids = film_ids(result);
    assert_eq!(ids.len(), 3);
    catalog_free_result(result);

    // Step 2: favorite the last film.
    let totoro = CString::new(ids[2].clone()).unwrap();
    let result = catalog_session_toggle_favorite(session, totoro.as_ptr());
    let r = unsafe { &*result };
    assert_eq!(r.error_code, FfiErrorCode::Ok);
    assert_eq!(r.data_tag, FfiDataTag::Flag);
    assert!(r.flag);
    catalog_free_result(result);

    let favorites = catalog_session_favorites(session);
    assert_eq!(film_ids(favorites), [ids[2].clone()]);
    catalog_free_result(favorites);

    catalog_session_free(session);
}
