use super::*;

const SEARCH_BODY: &str = r#"{
    "Search": [
        {"Title": "The Avengers", "Year": "2012", "imdbID": "tt0848228", "Type": "movie", "Poster": "https://m.media-amazon.com/images/M/avengers.jpg"},
        {"Title": "Avengers: Age of Ultron", "Year": "2015", "imdbID": "tt2395427", "Type": "movie", "Poster": "N/A"}
    ],
    "totalResults": "2",
    "Response": "True"
}"#;

const DETAIL_BODY: &str = r#"{
    "Title": "The Avengers",
    "Year": "2012",
    "Rated": "PG-13",
    "Released": "04 May 2012",
    "Runtime": "143 min",
    "Genre": "Action, Sci-Fi",
    "Director": "Joss Whedon",
    "Actors": "Robert Downey Jr., Chris Evans, Scarlett Johansson",
    "Plot": "Earth's mightiest heroes must come together.",
    "Poster": "https://m.media-amazon.com/images/M/avengers.jpg",
    "imdbRating": "8.0",
    "imdbID": "tt0848228",
    "Response": "True"
}"#;

#[test]
fn test_parse_search_response() {
    let results = parse_search_response(SEARCH_BODY).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].imdb_id, "tt0848228");
    assert_eq!(results[0].title, "The Avengers");
    assert_eq!(results[0].year, "2012");
    assert!(results[0].poster.is_some());
    assert_eq!(results[1].poster, None);
}

#[test]
fn test_parse_search_response_false() {
    let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
    let err = parse_search_response(body).unwrap_err();
    assert!(matches!(err, SourceError::NotFound));
    assert_eq!(err.to_string(), "No Movie Found");
}

#[test]
fn test_parse_search_response_bool_flag() {
    let body = r#"{"Response": true, "Search": [{"Title": "Avengers", "imdbID": "tt1"}]}"#;
    let results = parse_search_response(body).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Avengers");
    assert_eq!(results[0].year, "");
}

#[test]
fn test_parse_search_response_missing_flag() {
    let err = parse_search_response(r#"{"Search": []}"#).unwrap_err();
    assert!(matches!(err, SourceError::NotFound));
}

#[test]
fn test_parse_search_response_invalid_json() {
    let err = parse_search_response("<html>bad gateway</html>").unwrap_err();
    assert!(matches!(err, SourceError::Decode(_)));
}

#[test]
fn test_parse_detail_response() {
    let movie = parse_detail_response(DETAIL_BODY, "tt0848228").unwrap();

    assert_eq!(movie.imdb_id, "tt0848228");
    assert_eq!(movie.title, "The Avengers");
    assert_eq!(movie.runtime_minutes, Some(143));
    assert_eq!(movie.imdb_rating, Some(8.0));
    assert_eq!(movie.director.as_deref(), Some("Joss Whedon"));
    assert_eq!(movie.genre.as_deref(), Some("Action, Sci-Fi"));
    assert_eq!(movie.released.as_deref(), Some("04 May 2012"));
}

#[test]
fn test_parse_detail_response_not_available_fields() {
    let body = r#"{
        "Title": "Obscure Short",
        "Year": "1999",
        "Runtime": "N/A",
        "imdbRating": "N/A",
        "Plot": "N/A",
        "Poster": "N/A",
        "imdbID": "tt9999999",
        "Response": "True"
    }"#;
    let movie = parse_detail_response(body, "tt9999999").unwrap();

    assert_eq!(movie.runtime_minutes, None);
    assert_eq!(movie.imdb_rating, None);
    assert_eq!(movie.plot, None);
    assert_eq!(movie.poster, None);
    assert_eq!(movie.actors, None);
}

#[test]
fn test_parse_detail_response_error() {
    let body = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;
    let err = parse_detail_response(body, "bogus").unwrap_err();
    assert_eq!(err.to_string(), "Incorrect IMDb ID.");
}

#[test]
fn test_parse_runtime_minutes() {
    assert_eq!(parse_runtime_minutes("143 min"), Some(143));
    assert_eq!(parse_runtime_minutes("90"), Some(90));
    assert_eq!(parse_runtime_minutes("N/A"), None);
    assert_eq!(parse_runtime_minutes(""), None);
}

#[test]
fn test_parse_imdb_rating() {
    assert_eq!(parse_imdb_rating("7.5"), Some(7.5));
    assert_eq!(parse_imdb_rating("11.0"), None);
    assert_eq!(parse_imdb_rating("N/A"), None);
}
