//! Field rules and the conversion of request payloads into validated values.
//!
//! Each `resolve` takes the stored record when the request is a partial
//! update: fields the client left out then keep their stored value. Without a
//! stored record every required field must be present.

use crate::{
    entities::{actor, movie, oscar},
    error::{FieldErrors, NON_FIELD_ERRORS},
    models::{
        ActorFields, ActorPayload, AddCastPayload, CastByName, DirectorPayload, MovieFields,
        MoviePayload, NewCastMember, NewUser, OscarFields, OscarPayload, RatingPayload,
        SignupPayload,
    },
};

pub const MIN_YEAR: i32 = 1800;
pub const MIN_ACTOR_AGE: i32 = 5;
pub const MIN_SCORE: i64 = 1;
pub const MAX_SCORE: i64 = 10;
/// Movies released in or before this year must run under an hour.
pub const OLD_MOVIE_YEAR: i32 = 1920;
pub const OLD_MOVIE_MAX_MINUTES: f64 = 60.0;

const NAME_MAX_LEN: usize = 256;
const URL_MAX_LEN: usize = 512;
const EMAIL_MAX_LEN: usize = 254;
const PERSON_NAME_MAX_LEN: usize = 150;
const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MAX_LEN: usize = 128;

pub fn current_year() -> i32 {
    i32::from(jiff::Zoned::now().year())
}

pub fn check_year(errors: &mut FieldErrors, field: &str, year: i32, current_year: i32) {
    if year < MIN_YEAR {
        errors.add(field, format!("Ensure this value is greater than or equal to {MIN_YEAR}."));
    }
    if year > current_year {
        errors.add(field, "The year is in future");
    }
}

pub fn check_birth_year(errors: &mut FieldErrors, birth_year: i32, current_year: i32) {
    if i64::from(current_year) - i64::from(birth_year) < i64::from(MIN_ACTOR_AGE) {
        errors.add("birth_year", format!("Actor must be at least {MIN_ACTOR_AGE} years old"));
    }
}

pub fn check_score(errors: &mut FieldErrors, score: i64) -> Option<i16> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        errors.add("rating", format!("Ensure this value is between {MIN_SCORE} and {MAX_SCORE}."));
        return None;
    }
    i16::try_from(score).ok()
}

pub fn is_old_and_long(release_year: i32, duration_in_min: f64) -> bool {
    release_year <= OLD_MOVIE_YEAR && duration_in_min >= OLD_MOVIE_MAX_MINUTES
}

fn looks_like_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && domain.split('.').all(|part| !part.is_empty())
}

/// Picks the supplied value or the stored one; records a "required" error
/// when there is neither.
fn pick<T>(errors: &mut FieldErrors, field: &str, value: Option<T>, stored: Option<T>) -> Option<T> {
    let picked = value.or(stored);
    if picked.is_none() {
        errors.required(field);
    }
    picked
}

/// Like [`pick`] for text: trims supplied values and rejects blank or
/// overlong ones.
fn pick_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    stored: Option<&str>,
    max_len: usize,
) -> Option<String> {
    let Some(value) = value else {
        return pick(errors, field, None, stored.map(str::to_string));
    };
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, "This field may not be blank.");
        return None;
    }
    if value.chars().count() > max_len {
        errors.add(field, format!("Ensure this field has no more than {max_len} characters."));
        return None;
    }
    Some(value.to_string())
}

impl MoviePayload {
    /// Validates a new movie and its embedded cast.
    pub fn into_new(
        mut self,
        current_year: i32,
    ) -> Result<(MovieFields, Vec<NewCastMember>), FieldErrors> {
        let cast_payload = self.cast.take().unwrap_or_default();
        let mut errors = FieldErrors::default();
        let fields = self.fields(&mut errors, None, current_year);

        if let Some(fields) = &fields {
            if is_old_and_long(fields.release_year, fields.duration_in_min) {
                errors.add(NON_FIELD_ERRORS, "Old movies supposed to be short");
            }
        }

        let mut cast = Vec::with_capacity(cast_payload.len());
        for (i, entry) in cast_payload.into_iter().enumerate() {
            let actor = pick(&mut errors, &format!("cast[{i}].actor"), entry.actor, None);
            let salary = pick(&mut errors, &format!("cast[{i}].salary"), entry.salary, None);
            let main_role = pick(&mut errors, &format!("cast[{i}].main_role"), entry.main_role, None);
            if let (Some(actor_id), Some(salary), Some(main_role)) = (actor, salary, main_role) {
                cast.push(NewCastMember { actor_id, salary, main_role });
            }
        }

        errors.check()?;
        match fields {
            Some(fields) => Ok((fields, cast)),
            None => Err(FieldErrors::single(NON_FIELD_ERRORS, "Invalid movie.")),
        }
    }

    /// Validates a replacement (`stored == None`) or a merge over `stored`.
    pub fn into_update(
        self,
        stored: Option<&movie::Model>,
        current_year: i32,
    ) -> Result<MovieFields, FieldErrors> {
        let mut errors = FieldErrors::default();
        let fields = self.fields(&mut errors, stored, current_year);
        errors.check()?;
        fields.ok_or_else(|| FieldErrors::single(NON_FIELD_ERRORS, "Invalid movie."))
    }

    fn fields(
        self,
        errors: &mut FieldErrors,
        stored: Option<&movie::Model>,
        current_year: i32,
    ) -> Option<MovieFields> {
        let name =
            pick_text(errors, "name", self.name, stored.map(|m| m.name.as_str()), NAME_MAX_LEN);
        let description = pick_text(
            errors,
            "description",
            self.description,
            stored.map(|m| m.description.as_str()),
            usize::MAX,
        );

        let duration_in_min =
            pick(errors, "duration_in_min", self.duration_in_min, stored.map(|m| m.duration_in_min));
        if let Some(duration) = duration_in_min {
            if !duration.is_finite() || duration < 0.0 {
                errors.add("duration_in_min", "Ensure this value is greater than or equal to 0.");
            }
        }

        let release_year =
            pick(errors, "release_year", self.release_year, stored.map(|m| m.release_year));
        if let Some(year) = release_year {
            check_year(errors, "release_year", year, current_year);
        }

        let pic_url = match self.pic_url {
            Some(Some(url)) => {
                let url = url.trim().to_string();
                if url.chars().count() > URL_MAX_LEN {
                    errors.add(
                        "pic_url",
                        format!("Ensure this field has no more than {URL_MAX_LEN} characters."),
                    );
                } else if !looks_like_url(&url) {
                    errors.add("pic_url", "Enter a valid URL.");
                }
                Some(url)
            }
            Some(None) => None,
            None => stored.and_then(|m| m.pic_url.clone()),
        };

        Some(MovieFields {
            name: name?,
            description: description?,
            duration_in_min: duration_in_min?,
            release_year: release_year?,
            pic_url,
        })
    }
}

impl AddCastPayload {
    pub fn resolve(self) -> Result<CastByName, FieldErrors> {
        let mut errors = FieldErrors::default();
        let actor_name = pick_text(&mut errors, "actor_name", self.actor_name, None, NAME_MAX_LEN);
        let salary = pick(&mut errors, "salary", self.salary, None);
        let main_role = pick(&mut errors, "main_role", self.main_role, None);
        errors.check()?;
        match (actor_name, salary, main_role) {
            (Some(actor_name), Some(salary), Some(main_role)) => {
                Ok(CastByName { actor_name, salary, main_role })
            }
            _ => Err(FieldErrors::single(NON_FIELD_ERRORS, "Invalid cast entry.")),
        }
    }
}

impl ActorPayload {
    pub fn resolve(
        self,
        stored: Option<&actor::Model>,
        current_year: i32,
    ) -> Result<ActorFields, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name =
            pick_text(&mut errors, "name", self.name, stored.map(|a| a.name.as_str()), NAME_MAX_LEN);
        let birth_year = pick(&mut errors, "birth_year", self.birth_year, stored.map(|a| a.birth_year));
        if let Some(birth_year) = birth_year {
            check_birth_year(&mut errors, birth_year, current_year);
        }
        errors.check()?;
        match (name, birth_year) {
            (Some(name), Some(birth_year)) => Ok(ActorFields { name, birth_year }),
            _ => Err(FieldErrors::single(NON_FIELD_ERRORS, "Invalid actor.")),
        }
    }
}

impl RatingPayload {
    pub fn resolve(self) -> Result<i16, FieldErrors> {
        let mut errors = FieldErrors::default();
        let score = pick(&mut errors, "rating", self.rating, None)
            .and_then(|score| check_score(&mut errors, score));
        errors.check()?;
        score.ok_or_else(|| FieldErrors::single("rating", "Invalid rating."))
    }
}

impl OscarPayload {
    pub fn resolve(
        self,
        stored: Option<&oscar::Model>,
        current_year: i32,
    ) -> Result<OscarFields, FieldErrors> {
        let mut errors = FieldErrors::default();
        let year = pick(&mut errors, "year", self.year, stored.map(|o| o.year));
        if let Some(year) = year {
            check_year(&mut errors, "year", year, current_year);
        }
        let nomination = pick_text(
            &mut errors,
            "nomination",
            self.nomination,
            stored.map(|o| o.nomination.as_str()),
            NAME_MAX_LEN,
        );
        let movie_id = pick(&mut errors, "movie", self.movie, stored.map(|o| o.movie_id));
        let actor_id = self.actor.unwrap_or_else(|| stored.and_then(|o| o.actor_id));
        let director_id = self.director.unwrap_or_else(|| stored.and_then(|o| o.director_id));
        errors.check()?;
        match (year, nomination, movie_id) {
            (Some(year), Some(nomination), Some(movie_id)) => {
                Ok(OscarFields { year, nomination, movie_id, actor_id, director_id })
            }
            _ => Err(FieldErrors::single(NON_FIELD_ERRORS, "Invalid oscar.")),
        }
    }
}

impl DirectorPayload {
    pub fn resolve(self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = pick_text(&mut errors, "name", self.name, None, NAME_MAX_LEN);
        errors.check()?;
        name.ok_or_else(|| FieldErrors::single("name", "Invalid name."))
    }
}

impl SignupPayload {
    pub fn resolve(self) -> Result<NewUser, FieldErrors> {
        let mut errors = FieldErrors::default();

        let email = pick_text(&mut errors, "email", self.email, None, EMAIL_MAX_LEN);
        if let Some(email) = &email {
            if !looks_like_email(email) {
                errors.add("email", "Enter a valid email address.");
            }
        }

        // passwords are not trimmed
        let password = pick(&mut errors, "password", self.password, None);
        if let Some(password) = &password {
            let len = password.chars().count();
            if len < PASSWORD_MIN_LEN {
                errors.add(
                    "password",
                    format!(
                        "This password is too short. It must contain at least {PASSWORD_MIN_LEN} characters."
                    ),
                );
            }
            if len > PASSWORD_MAX_LEN {
                errors.add(
                    "password",
                    format!("Ensure this field has no more than {PASSWORD_MAX_LEN} characters."),
                );
            }
            if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
                errors.add("password", "This password is entirely numeric.");
            }
        }

        let first_name = optional_text(&mut errors, "first_name", self.first_name);
        let last_name = optional_text(&mut errors, "last_name", self.last_name);

        errors.check()?;
        match (email, password) {
            (Some(email), Some(password)) => Ok(NewUser { email, password, first_name, last_name }),
            _ => Err(FieldErrors::single(NON_FIELD_ERRORS, "Invalid signup.")),
        }
    }
}

fn optional_text(errors: &mut FieldErrors, field: &str, value: Option<String>) -> String {
    let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
    if value.chars().count() > PERSON_NAME_MAX_LEN {
        errors.add(
            field,
            format!("Ensure this field has no more than {PERSON_NAME_MAX_LEN} characters."),
        );
    }
    value
}
