/// Detail page carrying every field the extractors look for
pub const FULL_PRODUCT: &str = r#"<html><body>
<div id="centerCol">
  <h1><span id="productTitle">
        Phone X (Midnight, 128 GB)
  </span></h1>
  <span class="a-price"><span class="a-price-symbol">₹</span><span class="a-price-whole">9999<span class="a-price-decimal">.</span></span></span>
  <i class="a-icon a-icon-star a-star-4-5"><span class="a-icon-alt">4.5 out of 5 stars</span></i>
  <span id="acrCustomerReviewText">  120 ratings </span>
  <div id="availability">
    <span>
      In Stock
    </span>
  </div>
</div>
</body></html>"#;

/// Detail page with no product title
pub const UNTITLED_PRODUCT: &str = r#"<html><body>
<span class="a-price-whole">499.</span>
<span id="acrCustomerReviewText">3 ratings</span>
</body></html>"#;

/// Detail page with only a deal price and the general rating text
pub const DEAL_PRODUCT: &str = r#"<html><body>
<span id="productTitle">Budget Phone</span>
<span class="a-price a-text-price"><span class="a-offscreen">₹7,499.</span></span>
<i class="a-icon a-icon-star a-star-4"><span class="a-icon-alt">4.0 out of 5 stars</span></i>
</body></html>"#;

/// Search results page with two product anchors and one unrelated link
pub const LISTING_PAGE: &str = r#"<html><body>
<div class="s-result-item">
  <a class="a-link-normal s-no-hover s-underline-text s-underline-link-text s-link-style a-text-normal" href="/Phone-X/dp/B0001">Phone X</a>
</div>
<div class="s-result-item">
  <a class="a-link-normal s-underline-text s-underline-link-text s-link-style" href="/reviews/B0001">reviews</a>
  <a class="a-link-normal s-no-hover s-underline-text s-underline-link-text s-link-style a-text-normal" href="/Phone-Y/dp/B0002">Phone Y</a>
  <a class="a-link-normal s-no-hover s-underline-text s-underline-link-text s-link-style a-text-normal">no href</a>
</div>
</body></html>"#;
