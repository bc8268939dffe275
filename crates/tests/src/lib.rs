
#[cfg(test)]
mod visibility_tests;
#[cfg(test)]
mod notification_tests;
#[cfg(test)]
mod search_tests;
#[cfg(test)]
mod proxy_tests;
