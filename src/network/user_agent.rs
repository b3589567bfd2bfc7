//! User agent generation

use rand::seq::SliceRandom;
use rand::Rng;

/// Generate a random but realistic user agent string
pub fn generate_user_agent() -> String {
    let mut rng = rand::thread_rng();

    // Chrome versions (recent)
    let chrome_versions = [
        "120.0.0.0",
        "121.0.0.0",
        "122.0.0.0",
        "123.0.0.0",
        "124.0.0.0",
        "125.0.0.0",
    ];

    // Firefox versions (recent)
    let firefox_versions = ["121.0", "122.0", "123.0", "124.0", "125.0"];

    // Operating systems
    let os_strings = [
        "Windows NT 10.0; Win64; x64",
        "Macintosh; Intel Mac OS X 10_15_7",
        "X11; Linux x86_64",
        "X11; Ubuntu; Linux x86_64",
    ];

    let os = os_strings.choose(&mut rng).unwrap();

    // Browser choice
    let browser_type: u8 = rng.gen_range(0..10);

    if browser_type < 7 {
        // Chrome (70% chance)
        let chrome = chrome_versions.choose(&mut rng).unwrap();
        format!(
            "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
            os, chrome
        )
    } else {
        // Firefox (30% chance)
        let firefox = firefox_versions.choose(&mut rng).unwrap();
        format!(
            "Mozilla/5.0 ({}; rv:{}) Gecko/20100101 Firefox/{}",
            os, firefox, firefox
        )
    }
}

/// Standard accept header for JSON requests
pub fn accept_json() -> &'static str {
    "application/json,text/javascript,*/*;q=0.01"
}
