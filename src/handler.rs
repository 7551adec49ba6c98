// Rocket routes for the Battlesnake API
//
// Each route only unwraps the JSON request, hands it to the managed Bot, and
// wraps the Bot's answer back into JSON.

use rocket::http::Status;
use rocket::serde::json::Json;

use contour_snake::bot::Bot;
use contour_snake::types::{GameState, InfoResponse, MoveResponse};

/// GET / endpoint
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<InfoResponse> {
    Json(bot.info())
}

/// POST /start endpoint
#[post("/start", format = "json", data = "<req>")]
pub fn start(bot: &rocket::State<Bot>, req: Json<GameState>) -> Status {
    bot.start(&req.game, &req.turn, &req.board, &req.you);
    Status::Ok
}

/// POST /move endpoint
/// Answers within the configured budget even if the decision has not finished
#[post("/move", format = "json", data = "<req>")]
pub async fn get_move(bot: &rocket::State<Bot>, req: Json<GameState>) -> Json<MoveResponse> {
    let response = bot
        .get_move(&req.game, &req.turn, &req.board, &req.you)
        .await;
    Json(response)
}

/// POST /end endpoint
#[post("/end", format = "json", data = "<req>")]
pub fn end(bot: &rocket::State<Bot>, req: Json<GameState>) -> Status {
    bot.end(&req.game, &req.turn, &req.board, &req.you);
    Status::Ok
}
