use maud::{DOCTYPE, Markup, html};

use crate::{
    filter,
    models::Movie,
    sort::{SortField, SortOrder, SortSpec},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const DATASTAR_CDN: &str =
    "https://cdn.jsdelivr.net/npm/@sudodevnull/datastar@0.19.9/dist/datastar.js";
const NO_POSTER_IMAGE: &str =
    "https://dummyimage.com/200x400/BBB/202020.png&text=No+Poster+Available";

const BUTTON: &str = "rounded-md bg-blue-600 px-3 py-1.5 text-sm font-semibold text-white hover:bg-blue-700";
const BUTTON_QUIET: &str =
    "rounded-md border border-gray-300 px-3 py-1.5 text-sm text-gray-700 hover:bg-gray-100";
const INPUT: &str = "mt-1 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const LABEL: &str = "mt-3 block text-sm font-medium text-gray-700";

pub fn index_page() -> String {
    page(
        "Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                nav class="bg-white shadow" {
                    div class="max-w-6xl mx-auto px-6 py-4 flex items-center justify-between" {
                        h1 class="text-2xl font-bold text-gray-900" { "Movies" }
                        button id="create-add-form" class=(BUTTON) data-on-click="@get('/movies/new')" { "Add a movie" }
                    }
                }
                div id="modal" {}
                (loading())
            }
        },
    )
}

/// Placeholder shown until the first list arrives.
fn loading() -> Markup {
    html! {
        div id="content" class="max-w-6xl mx-auto px-6 py-10" data-on-load="@get('/movies')" {
            div id="loading" class="py-24 text-center" {
                div class="mx-auto h-12 w-12 rounded-full border-4 border-blue-200 border-t-blue-600 animate-spin" {}
                p class="mt-6 text-gray-600" { "Loading movies…" }
            }
        }
    }
}

/// Controls plus card grid; replaces `#content` on every refresh.
pub fn list_fragment(movies: &[Movie], sort: SortSpec, no_poster: &str) -> String {
    html! {
        div id="content" class="max-w-6xl mx-auto px-6 py-10"
            data-signals=(format!("{{sort: '{}', order: '{}', filter: ''}}", sort.field.as_str(), sort.order.as_str())) {
            (controls(sort))
            @if movies.is_empty() {
                div id="movie-display" class="mt-8 bg-white shadow rounded-lg p-8" {
                    p class="text-gray-600" { "No movies yet. Add one to get started." }
                }
            } @else {
                (card_grid(movies, "", no_poster))
            }
        }
    }
    .into_string()
}

/// Card grid re-rendered from the last list, hiding cards that don't match.
pub fn cards_fragment(movies: &[Movie], query: &str, no_poster: &str) -> String {
    card_grid(movies, query, no_poster).into_string()
}

pub fn details_fragment(movie: &Movie, no_poster: &str) -> String {
    html! {
        div id=(card_id(movie.id)) class="movie-card movie-details col-span-2 bg-white shadow rounded-lg flex overflow-hidden" data-card=(movie.id) {
            img class="w-40 object-cover" src=(poster_src(movie, no_poster)) alt=(movie.title);
            div class="flex flex-col flex-1 p-4" {
                h2 class="text-lg font-semibold text-gray-900" { (movie.title) }
                div class="mt-2 space-y-1 text-sm text-gray-700 overflow-auto" {
                    p { (movie.year) }
                    p { "Director: " (movie.director) }
                    p { "Actors: " (movie.actors_line()) }
                    p { (movie.plot) }
                }
                div class="mt-auto pt-4 flex justify-between" {
                    button class=(BUTTON_QUIET) data-on-click=(format!("@get('/movies/{}/delete')", movie.id)) { "Delete" }
                    button class=(BUTTON) data-on-click=(format!("@get('/movies/{}/edit')", movie.id)) { "Edit" }
                    button class=(BUTTON_QUIET) data-on-click="@get('/movies')" { "Done" }
                }
            }
        }
    }
    .into_string()
}

pub fn add_form() -> String {
    dialog(
        "Add a Movie",
        html! {
            form id="add-movie" data-on-submit="@post('/movies', {contentType: 'form'})" {
                label class=(LABEL) for="add-title" { "Title" }
                input class=(INPUT) id="add-title" name="title" type="text";
                label class=(LABEL) for="add-rating" { "Rating" }
                select class=(INPUT) id="add-rating" name="rating" {
                    @for n in 1..=5 {
                        option value=(n) selected[n == 3] { (n) }
                    }
                }
                label class=(LABEL) for="add-genre" { "Genre" }
                input class=(INPUT) id="add-genre" name="genre" type="text" placeholder="Drama, Crime";
                (dialog_footer("reset-add", "submit-add"))
            }
        },
    )
}

pub fn edit_form(movie: &Movie) -> String {
    dialog(
        &format!("Editing {}", movie.title),
        html! {
            form id="edit-movie" data-on-submit=(format!("@post('/movies/{}/edit', {{contentType: 'form'}})", movie.id)) {
                label class=(LABEL) for="title" { "Title" }
                input class=(INPUT) id="title" name="title" type="text" value=(movie.title);
                label class=(LABEL) for="new-rating" { "Rating" }
                input class=(INPUT) id="new-rating" name="rating" type="number" min="1" max="5" value=(movie.rating);
                label class=(LABEL) for="director" { "Director" }
                input class=(INPUT) id="director" name="director" type="text" value=(movie.director);
                label class=(LABEL) for="year" { "Year" }
                input class=(INPUT) id="year" name="year" type="text" value=(movie.year);
                label class=(LABEL) for="genre" { "Genre" }
                input class=(INPUT) id="genre" name="genre" type="text" value=(movie.genre_line());
                label class=(LABEL) for="poster" { "Poster" }
                input class=(INPUT) id="poster" name="poster" type="text" value=(movie.poster);
                label class=(LABEL) for="plot" { "Plot" }
                textarea class=(INPUT) id="plot" name="plot" rows="4" { (movie.plot) }
                label class=(LABEL) for="actors" { "Actors" }
                input class=(INPUT) id="actors" name="actors" type="text" value=(movie.actors_line());
                (dialog_footer("reset-edit", "submit-edit"))
            }
        },
    )
}

pub fn confirm_delete(movie: &Movie) -> String {
    dialog(
        "Delete movie",
        html! {
            p class="text-gray-700" { "Are you sure you want to delete " (movie.title) "?" }
            div class="mt-6 flex justify-end gap-3" {
                button id="cancel-delete" class=(BUTTON_QUIET) data-on-click="@get('/dialog/close')" { "No" }
                button id="confirm-delete" class=(BUTTON) data-on-click=(format!("@post('/movies/{}/delete')", movie.id)) { "Yes" }
            }
        },
    )
}

pub fn empty_dialog() -> String {
    html! { div id="modal" {} }.into_string()
}

pub fn error_fragment(message: &str) -> String {
    html! {
        div id="content" class="max-w-2xl mx-auto px-6 py-12" {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Something went wrong" }
                p class="mt-4 text-gray-700" { (message) }
                button id="retry" class=(format!("mt-6 {BUTTON}")) data-on-click="@get('/movies')" { "Retry" }
            }
        }
    }
    .into_string()
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
                script type="module" src=(DATASTAR_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn controls(sort: SortSpec) -> Markup {
    html! {
        div class="flex flex-wrap items-end gap-4" {
            div class="flex-1 min-w-48" {
                label class="block text-sm font-medium text-gray-700" for="movie-filter" { "Filter" }
                input id="movie-filter" class=(INPUT) type="search" placeholder="Type to filter"
                    data-bind-filter data-on-input="@get('/cards?filter=' + encodeURIComponent($filter))";
            }
            div {
                label class="block text-sm font-medium text-gray-700" for="sort-select" { "Sort by" }
                select id="sort-select" class=(INPUT) data-bind-sort
                    data-on-change="@get('/movies?sort=' + $sort + '&order=' + $order)" {
                    @for field in SortField::ALL {
                        option value=(field.as_str()) selected[field == sort.field] { (field.label()) }
                    }
                }
            }
            div {
                label class="block text-sm font-medium text-gray-700" for="order-select" { "Order" }
                select id="order-select" class=(INPUT) data-bind-order
                    data-on-change="@get('/movies?sort=' + $sort + '&order=' + $order)" {
                    option value=(SortOrder::Asc.as_str()) selected[sort.order == SortOrder::Asc] { "Ascending" }
                    option value=(SortOrder::Desc.as_str()) selected[sort.order == SortOrder::Desc] { "Descending" }
                }
            }
        }
    }
}

fn card_grid(movies: &[Movie], query: &str, no_poster: &str) -> Markup {
    let visible = filter::visibility(movies, query);
    html! {
        div id="movie-display" class="mt-8 grid gap-6 sm:grid-cols-2 lg:grid-cols-4" {
            @for (movie, shown) in movies.iter().zip(visible) {
                (card(movie, shown, no_poster))
            }
        }
    }
}

fn card(movie: &Movie, shown: bool, no_poster: &str) -> Markup {
    html! {
        div id=(card_id(movie.id)) class="movie-card group relative bg-white shadow rounded-lg overflow-hidden" data-card=(movie.id) hidden[!shown] {
            img class="movie-poster w-full h-72 object-cover" src=(poster_src(movie, no_poster)) alt=(movie.title);
            div class="p-4" {
                h5 class="text-lg font-semibold text-gray-900" { (movie.title) }
                p class="text-sm text-gray-600" { "Rating: " (movie.rating) "/5" }
                p class="text-sm text-gray-600" { "Genre: " (movie.genre_line()) }
            }
            div class="invisible group-hover:visible absolute inset-x-0 bottom-0 bg-white/80 p-3 flex justify-between" {
                button class=(BUTTON_QUIET) data-on-click=(format!("@get('/movies/{}')", movie.id)) { "Details" }
                button class=(BUTTON_QUIET) data-on-click=(format!("@get('/movies/{}/delete')", movie.id)) { "Delete" }
                button class=(BUTTON) data-on-click=(format!("@get('/movies/{}/edit')", movie.id)) { "Edit" }
            }
        }
    }
}

fn dialog(title: &str, body: Markup) -> String {
    html! {
        div id="modal" {
            div class="fixed inset-0 z-10 flex items-center justify-center bg-black/40" {
                div class="w-full max-w-lg bg-white rounded-lg shadow-lg" {
                    div class="flex items-center justify-between border-b px-6 py-4" {
                        h5 class="text-lg font-semibold text-gray-900" { (title) }
                        button class="text-2xl leading-none text-gray-500" aria-label="Close" data-on-click="@get('/dialog/close')" { "×" }
                    }
                    div class="px-6 py-4" { (body) }
                }
            }
        }
    }
    .into_string()
}

fn dialog_footer(reset_id: &str, submit_id: &str) -> Markup {
    html! {
        div class="mt-6 flex justify-end gap-3" {
            button id=(reset_id) type="button" class=(BUTTON_QUIET) data-on-click="@get('/movies')" { "Close" }
            button id=(submit_id) type="submit" class=(BUTTON) { "Save" }
        }
    }
}

fn card_id(id: u64) -> String {
    format!("card-{id}")
}

fn poster_src<'a>(movie: &'a Movie, no_poster: &str) -> &'a str {
    let poster = movie.poster.trim();
    if poster.is_empty() || poster == no_poster || poster == "N/A" { NO_POSTER_IMAGE } else { poster }
}
