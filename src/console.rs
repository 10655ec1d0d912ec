//! Console module: the line based menu front end.
//!
//! A `Console` owns one `Network` for the length of a session and talks to the
//! person at the keyboard through any `BufRead`/`Write` pair. It does all the
//! prompting, input validation and rendering; the core types never print.

use std::fmt::Display;
use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::network::Network;
use crate::post::{Post, Postable};
use crate::signup::{self, DEFAULT_EMAIL_DOMAIN, DEFAULT_SPECIAL_CHARS};
use crate::user::User;
use crate::util::{Clock, SystemClock};

/// Front-end settings.
#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    /// Name shown in the welcome banner
    pub app_name: String,
    /// Suffix every signup email must end with
    pub email_domain: String,
    /// A signup password must contain at least one of these
    pub special_chars: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            app_name: "Peeper".to_string(),
            email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
            special_chars: DEFAULT_SPECIAL_CHARS.to_string(),
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

pub struct Console<R, W> {
    network: Network,
    current_user: Option<String>,
    config: ConsoleConfig,
    clock: Box<dyn Clock>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, config: ConsoleConfig) -> Self {
        Self {
            network: Network::new(),
            current_user: None,
            config,
            clock: Box::new(SystemClock),
            input,
            output,
        }
    }

    /// Start the session with an existing network instead of an empty one.
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Use `clock` to stamp new posts.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// Run menus until the user exits or input runs out.
    pub fn run(&mut self) -> Result<()> {
        info!(app = %self.config.app_name, "session started");
        loop {
            let flow = match self.current_user.clone() {
                None => self.logged_out_menu()?,
                Some(identity) => self.logged_in_menu(&identity)?,
            };
            if let Flow::Exit = flow {
                break;
            }
        }
        self.output.flush()?;
        info!(users = self.network.len(), "session ended");
        Ok(())
    }

    fn logged_out_menu(&mut self) -> Result<Flow> {
        let banner = format!(
            "Welcome to {}!\n1) Login\n2) Sign up\n3) Exit",
            self.config.app_name
        );
        let Some(choice) = self.prompt(banner)? else {
            return Ok(Flow::Exit);
        };

        match choice.trim().parse::<u32>() {
            Ok(1) => self.handle_login(),
            Ok(2) => self.handle_signup(),
            Ok(3) => Ok(Flow::Exit),
            _ => self.invalid_choice(&choice),
        }
    }

    fn logged_in_menu(&mut self, identity: &str) -> Result<Flow> {
        let menu = format!(
            "{identity}:\n1) View posts\n2) Add post\n3) View friends\n4) Add friend\n5) Remove friend\n6) View friends activity feed\n7) Logout"
        );
        let Some(choice) = self.prompt(menu)? else {
            return Ok(Flow::Exit);
        };

        match choice.trim().parse::<u32>() {
            Ok(1) => self.handle_view_posts(identity),
            Ok(2) => self.handle_add_post(identity),
            Ok(3) => self.handle_view_friends(identity),
            Ok(4) => self.handle_add_friend(identity),
            Ok(5) => self.handle_remove_friend(identity),
            Ok(6) => self.handle_activity_feed(identity),
            Ok(7) => {
                info!(user = identity, "logged out");
                self.current_user = None;
                Ok(Flow::Continue)
            }
            _ => self.invalid_choice(&choice),
        }
    }

    fn invalid_choice(&mut self, choice: &str) -> Result<Flow> {
        debug!(choice, "invalid menu choice");
        self.say("Invalid choice, please try again.")?;
        Ok(Flow::Continue)
    }

    fn handle_login(&mut self) -> Result<Flow> {
        let Some(username) = self.prompt("Enter username:")? else {
            return Ok(Flow::Exit);
        };
        let Some(password) = self.prompt("Enter password:")? else {
            return Ok(Flow::Exit);
        };

        if self.network.authenticate(&username, &password) {
            info!(user = %username, "login succeeded");
            self.current_user = Some(username);
            self.say("Login successful!\n")?;
        } else {
            warn!(user = %username, "login failed");
            self.say("Incorrect username or password.\n")?;
        }
        Ok(Flow::Continue)
    }

    fn handle_signup(&mut self) -> Result<Flow> {
        let Some(username) = self.prompt("Enter username:")? else {
            return Ok(Flow::Exit);
        };
        if self.network.contains(&username) {
            debug!(user = %username, "signup rejected, username taken");
            self.say(format!("Username already taken: {username}\n"))?;
            return Ok(Flow::Continue);
        }
        if username.is_empty() {
            self.say("Username must not be empty\n")?;
            return Ok(Flow::Continue);
        }

        let email = loop {
            let Some(email) = self.prompt("Enter email:")? else {
                return Ok(Flow::Exit);
            };
            match signup::validate_email(&email, &self.config.email_domain) {
                Ok(()) => break email,
                Err(err) => self.say(err)?,
            }
        };

        let password = loop {
            let Some(password) = self.prompt("Enter password:")? else {
                return Ok(Flow::Exit);
            };
            match signup::validate_password(&password, &self.config.special_chars) {
                Ok(()) => break password,
                Err(err) => self.say(err)?,
            }
        };

        let registered = User::new(username.as_str(), email, password)
            .and_then(|user| self.network.register(user));
        match registered {
            Ok(()) => {
                info!(user = %username, "signed up");
                self.current_user = Some(username);
                self.say("Signup successful!\n")?;
            }
            Err(err) => self.say(format!("{err}\n"))?,
        }
        Ok(Flow::Continue)
    }

    fn handle_view_posts(&mut self, identity: &str) -> Result<Flow> {
        let lines: Vec<String> = match self.network.get_user(identity) {
            Some(user) => user.posts().iter().map(|p| p.content().to_string()).collect(),
            None => Vec::new(),
        };

        if lines.is_empty() {
            self.say("No posts to display.\n")?;
        }
        for line in lines {
            self.say(line)?;
        }
        Ok(Flow::Continue)
    }

    fn handle_add_post(&mut self, identity: &str) -> Result<Flow> {
        let post = loop {
            let Some(content) = self.prompt("Enter post content:")? else {
                return Ok(Flow::Exit);
            };
            match Post::create(content, self.clock.as_ref()) {
                Ok(post) => break post,
                Err(err) => {
                    debug!(user = identity, %err, "post rejected");
                    self.say(format!("Invalid Content: {err}"))?;
                }
            }
        };

        if let Some(user) = self.network.get_user_mut(identity) {
            user.add_post(post);
            info!(user = identity, posts = user.posts().len(), "post added");
        }
        self.say("Post added!\n")?;
        Ok(Flow::Continue)
    }

    fn handle_view_friends(&mut self, identity: &str) -> Result<Flow> {
        let friends: Vec<String> = self
            .network
            .get_user(identity)
            .map(|user| user.friends().to_vec())
            .unwrap_or_default();

        if friends.is_empty() {
            self.say("You have no friends.\n")?;
        }
        for friend in friends {
            self.say(friend)?;
        }
        Ok(Flow::Continue)
    }

    fn handle_add_friend(&mut self, identity: &str) -> Result<Flow> {
        let Some(friend) = self.prompt("Enter friend's username:")? else {
            return Ok(Flow::Exit);
        };

        let already_friends = self
            .network
            .get_user(identity)
            .is_some_and(|user| user.is_friend(&friend));
        if !self.network.contains(&friend) {
            self.say("User not found.\n")?;
        } else if friend == identity {
            self.say("You cannot add yourself as a friend.\n")?;
        } else if already_friends {
            self.say(format!("You are already friends with {friend}.\n"))?;
        } else {
            match self.network.add_friend(identity, &friend) {
                Ok(()) => {
                    info!(user = identity, %friend, "friend added");
                    self.say("Friend added!\n")?;
                }
                Err(err) => self.say(format!("{err}\n"))?,
            }
        }
        Ok(Flow::Continue)
    }

    fn handle_remove_friend(&mut self, identity: &str) -> Result<Flow> {
        let Some(friend) = self.prompt("Enter friend's username:")? else {
            return Ok(Flow::Exit);
        };

        let is_friend = self
            .network
            .get_user(identity)
            .is_some_and(|user| user.is_friend(&friend));
        if !self.network.contains(&friend) {
            self.say("User not found.\n")?;
        } else if !is_friend {
            self.say(format!("{friend} is not your friend.\n"))?;
        } else {
            match self.network.remove_friend(identity, &friend) {
                Ok(()) => {
                    info!(user = identity, %friend, "friend removed");
                    self.say("Friend removed.\n")?;
                }
                Err(err) => self.say(format!("{err}\n"))?,
            }
        }
        Ok(Flow::Continue)
    }

    fn handle_activity_feed(&mut self, identity: &str) -> Result<Flow> {
        let has_friends = self
            .network
            .get_user(identity)
            .is_some_and(|user| user.friend_count() > 0);
        if !has_friends {
            self.say("You have no friends.\n")?;
            return Ok(Flow::Continue);
        }

        let feed = self.network.activity_feed(identity)?;
        let rendered = if feed.is_empty() {
            "No recent activity.\n".to_string()
        } else {
            feed.to_string()
        };
        debug!(user = identity, entries = feed.len(), "activity feed built");

        self.say(format!("Activity feed for {identity}'s friends"))?;
        self.say(rendered)?;
        Ok(Flow::Continue)
    }

    fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    // None once input is exhausted. Lines that are not UTF-8 are refused and
    // the prompt is shown again.
    fn prompt(&mut self, text: impl Display) -> Result<Option<String>> {
        loop {
            self.say(&text)?;
            self.output.flush()?;

            let mut bytes = Vec::new();
            if self.input.read_until(b'\n', &mut bytes)? == 0 {
                return Ok(None);
            }
            match String::from_utf8(bytes) {
                Ok(mut line) => {
                    let trimmed = line.trim_end_matches(['\n', '\r']).len();
                    line.truncate(trimmed);
                    return Ok(Some(line));
                }
                Err(err) => {
                    warn!(%err, "input is not valid UTF-8");
                    self.say("Invalid input, please try again.")?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, FixedOffset};
    use std::cell::Cell;
    use std::io::Cursor;

    /// Moves one minute forward every time it is read.
    struct TickingClock(Cell<DateTime<FixedOffset>>);

    impl TickingClock {
        fn new() -> Self {
            Self(Cell::new(DateTime::parse_from_rfc3339("2025-03-01T09:00:00+00:00").unwrap()))
        }
    }

    impl Clock for TickingClock {
        fn now(&self) -> DateTime<FixedOffset> {
            let now = self.0.get() + Duration::minutes(1);
            self.0.set(now);
            now
        }
    }

    fn seeded() -> Network {
        let mut network = Network::new();
        for name in ["rory", "simon", "brody"] {
            network
                .register(User::new(name, format!("{name}@ttu.edu"), "pw!").unwrap())
                .unwrap();
        }
        network
    }

    fn session(network: Network, script: &[&str]) -> (String, Network) {
        let input = script.join("\n") + "\n";
        let mut output = Vec::new();
        let mut console = Console::new(Cursor::new(input), &mut output, ConsoleConfig::default())
            .with_network(network)
            .with_clock(TickingClock::new());
        console.run().unwrap();
        let network = console.into_network();
        (String::from_utf8(output).unwrap(), network)
    }

    #[test]
    fn test_exit_and_invalid_choice() {
        let (out, _) = session(Network::new(), &["9", "abc", "3"]);
        assert!(out.starts_with("Welcome to Peeper!\n1) Login"));
        assert_eq!(out.matches("Invalid choice, please try again.").count(), 2);
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (out, _) = session(Network::new(), &["2", "newbie"]);
        assert!(out.ends_with("Enter email:\n"));
    }

    #[test]
    fn test_signup_reprompts_until_rules_pass() {
        let (out, network) = session(
            Network::new(),
            &["2", "rory", "rory@gmail.com", "rory@ttu.edu", "plain", "pl@in", "7", "3"],
        );
        assert!(out.contains("Invalid email: Email must end with @ttu.edu"));
        assert!(out.contains("Invalid password: Password must contain at least one special character"));
        assert!(out.contains("Signup successful!"));
        assert!(out.contains("rory:\n1) View posts"));
        assert!(network.authenticate("rory", "pl@in"));
        assert_eq!(network.get_user("rory").unwrap().email(), "rory@ttu.edu");
    }

    #[test]
    fn test_signup_rejects_taken_username() {
        let (out, network) = session(seeded(), &["2", "rory", "3"]);
        assert!(out.contains("Username already taken: rory"));
        assert!(network.authenticate("rory", "pw!"));
    }

    #[test]
    fn test_login() {
        let (out, _) = session(
            seeded(),
            &["1", "rory", "wrong", "1", "ghost", "pw!", "1", "rory", "pw!", "7", "3"],
        );
        assert_eq!(out.matches("Incorrect username or password.").count(), 2);
        assert!(out.contains("Login successful!"));
    }

    #[test]
    fn test_posts() {
        let long = "x".repeat(251);
        let (out, network) = session(
            seeded(),
            &["1", "rory", "pw!", "1", "2", long.as_str(), "first", "2", "second", "1", "7", "3"],
        );
        assert!(out.contains("No posts to display."));
        assert!(out.contains("Invalid Content: Post may not exceed 250 characters (got 251)"));
        assert!(out.contains("first\nsecond\n"));

        let contents: Vec<&str> = network
            .get_user("rory")
            .unwrap()
            .posts()
            .iter()
            .map(|p| p.content())
            .collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn test_friend_management() {
        let (out, network) = session(
            seeded(),
            &[
                "1", "rory", "pw!", "3", "4", "ghost", "4", "rory", "4", "simon", "4", "simon",
                "3", "5", "brody", "5", "simon", "5", "ghost", "7", "3",
            ],
        );
        assert!(out.contains("You have no friends."));
        assert!(out.contains("User not found."));
        assert!(out.contains("You cannot add yourself as a friend."));
        assert!(out.contains("Friend added!"));
        assert!(out.contains("You are already friends with simon."));
        assert!(out.contains("brody is not your friend."));
        assert!(out.contains("Friend removed."));

        assert_eq!(network.get_user("rory").unwrap().friend_count(), 0);
        assert_eq!(network.get_user("simon").unwrap().friend_count(), 0);
    }

    #[test]
    fn test_activity_feed() {
        let (_, network) = session(
            seeded(),
            &[
                "1", "simon", "pw!", "2", "s1", "2", "s2", "7", "1", "brody", "pw!", "2", "b1",
                "7", "3",
            ],
        );
        let (out, _) = session(
            network,
            &["1", "rory", "pw!", "6", "4", "simon", "4", "brody", "6", "7", "3"],
        );

        assert!(out.contains("You have no friends."));
        assert!(out.contains(
            "Activity feed for rory's friends\nbrody • 2025-03-01 09:03\n\tb1\nsimon • 2025-03-01 09:02\n\ts2\nsimon • 2025-03-01 09:01\n\ts1\n"
        ));
    }

    #[test]
    fn test_non_utf8_line_is_refused() {
        let mut input = b"\xff\xfe\n1\nro".to_vec();
        input.extend_from_slice(b"\xc3\n"); // truncated multi-byte character
        input.extend_from_slice(b"rory\npw!\n7\n3\n");

        let mut output = Vec::new();
        let mut console = Console::new(Cursor::new(input), &mut output, ConsoleConfig::default())
            .with_network(seeded());
        console.run().unwrap();
        assert_eq!(console.current_user(), None);

        let out = String::from_utf8(output).unwrap();
        assert_eq!(out.matches("Invalid input, please try again.").count(), 2);
        assert!(out.contains("Invalid input, please try again.\nEnter username:\n"));
        assert!(out.contains("Login successful!"));
        assert!(out.ends_with("3) Exit\n"));
    }

    #[test]
    fn test_activity_feed_without_posts() {
        let mut network = seeded();
        network.add_friend("rory", "simon").unwrap();
        let (out, _) = session(network, &["1", "rory", "pw!", "6", "7", "3"]);
        assert!(out.contains("No recent activity."));
    }

    #[test]
    fn test_custom_config() {
        let config = ConsoleConfig {
            app_name: "Chirp".to_string(),
            email_domain: "@example.org".to_string(),
            special_chars: "-".to_string(),
        };
        let mut output = Vec::new();
        let input = Cursor::new("2\nann\nann@example.org\na-b\n7\n3\n");
        let mut console = Console::new(input, &mut output, config);
        console.run().unwrap();
        assert!(console.network().authenticate("ann", "a-b"));
        assert_eq!(console.current_user(), None);

        let out = String::from_utf8(output).unwrap();
        assert!(out.starts_with("Welcome to Chirp!"));
    }
}
