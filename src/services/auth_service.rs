use crate::database::MongoDB;
use crate::models::{User, UserInfo};
use crate::utils::error::{is_duplicate_key, AppError};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// JWT claims. The user id is the only identity claim the token carries;
/// iat/exp bound its validity window.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: String,
    pub iat: usize,
    pub exp: usize,
}

// Request/Response structures
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    pub user: UserInfo,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserInfo,
}

fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

fn get_jwt_expiry_minutes() -> i64 {
    std::env::var("JWT_EXPIRY_MINUTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(60)
}

/// Generate a bearer token for the given user id (60-minute expiry).
pub fn generate_jwt(user_id: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        id: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::minutes(get_jwt_expiry_minutes())).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_jwt_secret().as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

/// Verify signature and expiry. Both failure modes surface as 403, matching
/// the gate's contract (401 is reserved for a missing token).
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_jwt_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Forbidden("Invalid or expired access token".to_string()))
}

/// User registration. The unique email index turns a duplicate insert into
/// the 409 path; no prior read involved.
pub async fn register(db: &MongoDB, request: &RegisterRequest) -> Result<UserInfo, AppError> {
    let username = request.username.trim();
    let email = request.email.trim().to_lowercase();

    if username.is_empty() || email.is_empty() || request.password.is_empty() {
        return Err(AppError::InvalidRequest(
            "Username, email and password are required".to_string(),
        ));
    }

    let hashed_password = hash(&request.password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

    let now = BsonDateTime::now();
    let new_user = User {
        id: None,
        username: username.to_string(),
        email,
        password: hashed_password,
        created_at: now,
        updated_at: now,
    };

    let collection = db.collection::<User>("users");
    let result = collection.insert_one(&new_user).await.map_err(|e| {
        if is_duplicate_key(&e) {
            AppError::Conflict("An account with this email already exists".to_string())
        } else {
            AppError::DatabaseError(e.to_string())
        }
    })?;

    Ok(UserInfo {
        id: result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .unwrap_or_default(),
        username: new_user.username,
        email: new_user.email,
    })
}

/// User login: 404 for an unknown email, 401 for a bad password.
pub async fn login(db: &MongoDB, request: &LoginRequest) -> Result<AuthResponse, AppError> {
    let email = request.email.trim().to_lowercase();

    let collection = db.collection::<User>("users");
    let user = collection
        .find_one(doc! { "email": &email })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("No account found with this email".to_string()))?;

    let valid = verify(&request.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))?;

    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let user_id = user.id.map(|id| id.to_hex()).unwrap_or_default();
    let token = generate_jwt(&user_id)?;

    Ok(AuthResponse {
        success: true,
        token,
        user: UserInfo {
            id: user_id,
            username: user.username,
            email: user.email,
        },
    })
}

/// Resolve a claimed id to a live user record. One extra document lookup per
/// protected request.
pub async fn get_user_info(db: &MongoDB, user_id: &str) -> Result<UserInfo, AppError> {
    let object_id = ObjectId::parse_str(user_id)
        .map_err(|_| AppError::InvalidRequest("Invalid user id".to_string()))?;

    let collection = db.collection::<User>("users");
    let user = collection
        .find_one(doc! { "_id": object_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(UserInfo::from(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_ID: &str = "507f1f77bcf86cd799439011";

    #[test]
    fn test_jwt_round_trip() {
        let token = generate_jwt(USER_ID).unwrap();
        let claims = verify_token(&token).unwrap();

        assert_eq!(claims.id, USER_ID);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims {
            id: USER_ID.to_string(),
            iat: (Utc::now() - Duration::hours(2)).timestamp() as usize,
            exp: (Utc::now() - Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(get_jwt_secret().as_ref()),
        )
        .unwrap();

        let err = verify_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = generate_jwt(USER_ID).unwrap();
        let mut tampered = token;
        tampered.pop();

        assert!(verify_token(&tampered).is_err());
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hashed = hash("pw", DEFAULT_COST).unwrap();

        assert_ne!(hashed, "pw");
        assert!(verify("pw", &hashed).unwrap());
        assert!(!verify("wrong", &hashed).unwrap());
    }
}
